//! Default values applied when configuration fields are omitted.

use crate::logging::LogFormat;

/// Encoding passed to the server when the user has not chosen one.
pub const DEFAULT_FILE_ENCODING: &str = "UTF-8";

/// Default log filter expression used by hosts embedding the launcher.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Owned default encoding, used where serde needs a value.
#[must_use]
pub fn default_file_encoding() -> String {
    DEFAULT_FILE_ENCODING.to_owned()
}

/// Owned default log filter, used where serde needs a value.
#[must_use]
pub fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}
