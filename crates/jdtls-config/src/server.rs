//! User settings for the language server process.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::defaults::default_file_encoding;

/// Settings that shape the server command line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfiguration {
    /// Raw, whitespace separated extra JVM arguments. May be empty.
    #[serde(default)]
    pub vm_args: String,
    /// Encoding passed as `-Dfile.encoding` unless `vm_args` already sets it.
    #[serde(default = "default_file_encoding")]
    pub file_encoding: String,
    /// Server distribution root searched for the launcher jar and the
    /// `config_*` directories.
    pub launcher_root: Utf8PathBuf,
}

impl ServerConfiguration {
    /// Creates a configuration with no extra VM arguments and the default
    /// encoding.
    #[must_use]
    pub fn new(launcher_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            vm_args: String::new(),
            file_encoding: default_file_encoding(),
            launcher_root: launcher_root.into(),
        }
    }

    /// Sets the raw VM argument line.
    #[must_use]
    pub fn with_vm_args(mut self, vm_args: impl Into<String>) -> Self {
        self.vm_args = vm_args.into();
        self
    }

    /// Sets the file encoding.
    #[must_use]
    pub fn with_file_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.file_encoding = encoding.into();
        self
    }

    /// Server distribution root.
    #[must_use]
    pub fn launcher_root(&self) -> &Utf8Path {
        self.launcher_root.as_path()
    }
}
