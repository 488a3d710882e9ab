use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A located Java installation.
///
/// Produced by the host's runtime discovery and never modified here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuntimeDescriptor {
    /// Root of the JDK, the directory containing `bin/java`.
    pub install_path: Utf8PathBuf,
    /// Feature release number, e.g. `8`, `11`, `17`.
    pub major_version: u32,
}

impl RuntimeDescriptor {
    /// Creates a descriptor for the JDK at `install_path`.
    #[must_use]
    pub fn new(install_path: impl Into<Utf8PathBuf>, major_version: u32) -> Self {
        Self {
            install_path: install_path.into(),
            major_version,
        }
    }

    /// Whether the runtime has the Java platform module system (Java 9+).
    #[must_use]
    pub const fn has_module_system(&self) -> bool {
        self.major_version > 8
    }
}
