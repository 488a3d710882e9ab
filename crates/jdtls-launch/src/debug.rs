//! Detects whether the host itself was started under a debugger.

use std::env;

const DEBUG_FLAG_PREFIXES: [&str; 3] = ["--debug", "--debug-brk", "--inspect-brk"];

/// Returns `true` when any launch argument requests debugging.
///
/// Matches `--debug`, `--debug-brk` and `--inspect-brk`, each optionally
/// followed by `=<value>`. The host evaluates this once and passes the result
/// on through [`LaunchContext`](crate::LaunchContext).
#[must_use]
pub fn started_in_debug_mode<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter().any(|arg| {
        let text = arg.as_ref();
        DEBUG_FLAG_PREFIXES
            .iter()
            .any(|prefix| text.starts_with(prefix))
    })
}

/// Applies [`started_in_debug_mode`] to this process's own arguments.
///
/// Host convenience for computing [`LaunchContext::debug`](crate::LaunchContext::debug)
/// once at startup. Arguments that are not valid Unicode are compared after
/// lossy conversion.
#[must_use]
pub fn started_in_debug_mode_from_env() -> bool {
    started_in_debug_mode(env::args_os().map(|arg| arg.to_string_lossy().into_owned()))
}
