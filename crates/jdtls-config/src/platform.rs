//! Operating systems that select a server configuration directory.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Platform the language server is launched on.
///
/// Serialises as [`Platform::as_str`] and deserialises through [`FromStr`],
/// so node-style names such as `darwin` are accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Platform {
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    MacOs,
    /// Linux distributions.
    Linux,
    /// Any other operating system.
    Other,
}

impl Platform {
    /// Returns the platform this process is running on.
    #[must_use]
    pub fn current() -> Self {
        Self::from_os(env::consts::OS)
    }

    /// Maps an OS identifier as reported by `std::env::consts::OS`.
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            _ => Self::Other,
        }
    }

    /// Returns the canonical lower-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Other => "other",
        }
    }

    /// Name of the configuration directory shipped with the server for this
    /// platform.
    ///
    /// Unknown platforms fall back to the Windows layout.
    #[must_use]
    pub const fn config_dir_name(self) -> &'static str {
        match self {
            Self::MacOs => "config_mac",
            Self::Linux => "config_linux",
            Self::Windows | Self::Other => "config_win",
        }
    }

    /// Whether the platform is Windows.
    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Errors raised when parsing platform identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported platform '{0}'")]
pub struct PlatformParseError(String);

impl PlatformParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "windows" | "win32" => Ok(Self::Windows),
            "macos" | "darwin" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            "other" => Ok(Self::Other),
            _ => Err(PlatformParseError(input.to_owned())),
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = PlatformParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_owned()
    }
}
