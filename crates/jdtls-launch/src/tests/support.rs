//! Shared fixtures for launch tests.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// File name of the launcher jar placed in test distributions.
pub const LAUNCHER_JAR: &str = "org.eclipse.equinox.launcher_1.6.400.v20210924-0641.jar";

/// A throwaway server distribution on disk.
pub struct Distribution {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Distribution {
    /// Creates an empty distribution directory.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 temp dir");
        Self { _dir: dir, root }
    }

    /// Creates a distribution holding a launcher jar under `plugins/`.
    pub fn with_launcher() -> Self {
        let distribution = Self::empty();
        distribution.add_file(&format!("plugins/{LAUNCHER_JAR}"));
        distribution
    }

    /// Writes an empty file at `relative`, creating parent directories.
    pub fn add_file(&self, relative: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, b"").expect("write file");
    }

    /// Root directory of the distribution.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of the default launcher jar.
    pub fn launcher_path(&self) -> String {
        self.root.join("plugins").join(LAUNCHER_JAR).into_string()
    }
}

/// Returns the index of `flag` in `params`, panicking when absent.
pub fn position_of(params: &[String], flag: &str) -> usize {
    params
        .iter()
        .position(|param| param == flag)
        .unwrap_or_else(|| panic!("missing {flag} in {params:?}"))
}

/// Returns the value following `flag`.
pub fn value_after<'a>(params: &'a [String], flag: &str) -> &'a str {
    params
        .get(position_of(params, flag) + 1)
        .map(String::as_str)
        .unwrap_or_else(|| panic!("{flag} has no value in {params:?}"))
}
