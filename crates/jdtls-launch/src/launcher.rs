//! Locates the Equinox launcher jar inside a server distribution.

use std::path::{self, Path};

use camino::{Utf8Path, Utf8PathBuf};
use globset::{GlobBuilder, GlobMatcher};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::errors::LaunchError;

const LAUNCHER_TARGET: &str = "jdtls_launch::launcher";

/// Glob, relative to the distribution root, naming the launcher jar.
pub const LAUNCHER_PATTERN: &str = "**/plugins/org.eclipse.equinox.launcher_*.jar";

/// Searches `root` recursively for the launcher jar and returns its absolute
/// path.
///
/// When several jars match, the first one met while walking the tree wins;
/// no version ordering is applied. Hidden entries (names starting with `.`)
/// below `root` are not descended into, and unreadable directories are
/// skipped.
///
/// # Errors
///
/// Returns [`LaunchError::MissingLauncher`] when nothing under `root` matches
/// [`LAUNCHER_PATTERN`].
pub fn find_launcher_jar(root: &Utf8Path) -> Result<Utf8PathBuf, LaunchError> {
    let matcher = launcher_matcher()?;
    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));
    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(error) => {
                warn!(
                    target: LAUNCHER_TARGET,
                    root = %root,
                    error = %error,
                    "skipping unreadable entry during launcher search"
                );
                continue;
            }
        };
        if !is_launcher_candidate(&matcher, root.as_std_path(), entry.path()) {
            continue;
        }
        match absolute_utf8(entry.path()) {
            Ok(jar) => {
                debug!(target: LAUNCHER_TARGET, jar = %jar, "found launcher jar");
                return Ok(jar);
            }
            Err(error) => {
                warn!(
                    target: LAUNCHER_TARGET,
                    error = %error,
                    "ignoring launcher jar with unusable path"
                );
            }
        }
    }
    Err(LaunchError::MissingLauncher {
        root: root.to_path_buf(),
        pattern: LAUNCHER_PATTERN,
    })
}

fn launcher_matcher() -> Result<GlobMatcher, LaunchError> {
    GlobBuilder::new(LAUNCHER_PATTERN)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| LaunchError::LauncherPattern {
            pattern: LAUNCHER_PATTERN,
            source,
        })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn is_launcher_candidate(matcher: &GlobMatcher, root: &Path, path: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    matcher.is_match(relative) && path.is_file()
}

/// Makes `path` absolute against the current directory without touching the
/// filesystem, and checks it is UTF-8.
pub(crate) fn absolute_utf8(path: &Path) -> Result<Utf8PathBuf, LaunchError> {
    let absolute = path::absolute(path).map_err(|source| LaunchError::ResolvePath {
        path: Utf8PathBuf::from(path.to_string_lossy().into_owned()),
        source,
    })?;
    Utf8PathBuf::from_path_buf(absolute).map_err(|path| LaunchError::NonUtf8Path { path })
}
