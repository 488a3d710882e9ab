//! Splits the user's raw VM argument line into discrete arguments.
//!
//! Tokens are runs of non-whitespace characters in which double-quoted spans
//! may contain whitespace, so `-Dname="a b"` stays one token. Each token is
//! then unescaped: bare double quotes are dropped and `\"` becomes `"`.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::arguments::ARGUMENTS_TARGET;

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r#"(?:[^\s"]+|"[^"]*")+"#));
static BARE_QUOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r#"(\\)?""#));
static ESCAPED_QUOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| compile_regex(r#"\\""#));

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        // Covered by the tokenizer tests.
        Err(err) => panic!("invalid regex pattern `{pattern}`: {err}"),
    }
}

/// Splits `line` into raw tokens, quotes included.
///
/// An empty line, or one with nothing but whitespace, yields no tokens.
#[must_use]
pub fn tokenize_vm_args(line: &str) -> Vec<&str> {
    TOKEN_REGEX.find_iter(line).map(|m| m.as_str()).collect()
}

/// Removes unescaped double quotes from `token`, then unescapes `\"`.
#[must_use]
pub fn unescape_vm_arg(token: &str) -> String {
    let without_bare = BARE_QUOTE_REGEX.replace_all(token, |caps: &Captures<'_>| {
        if caps.get(1).is_some() {
            r#"\""#
        } else {
            ""
        }
    });
    ESCAPED_QUOTE_REGEX
        .replace_all(&without_bare, "\"")
        .into_owned()
}

/// Appends every argument from `line` that `params` does not already hold.
///
/// Existing entries keep their positions; new ones follow in the order they
/// appear in `line`. Duplicates within `line` itself are dropped as well.
pub fn parse_vm_args(params: &mut Vec<String>, line: &str) {
    for token in tokenize_vm_args(line) {
        let argument = unescape_vm_arg(token);
        if params.contains(&argument) {
            debug!(
                target: ARGUMENTS_TARGET,
                argument = %argument,
                "dropping duplicate VM argument"
            );
            continue;
        }
        params.push(argument);
    }
}
