//! Caller-supplied inputs for launching the Java language server.
//!
//! The editor host discovers the Java runtime and loads user settings; this
//! crate only describes the shape of that data. [`RuntimeDescriptor`] names
//! the located JDK, [`ServerConfiguration`] carries the user's VM arguments,
//! file encoding, and the directory holding the server distribution, and
//! [`Platform`] selects the OS-specific configuration directory. Logging
//! settings shared with the launch crate live in [`LogSettings`].

mod defaults;
mod logging;
mod platform;
mod runtime;
mod server;

pub use defaults::{
    DEFAULT_FILE_ENCODING, DEFAULT_LOG_FILTER, default_file_encoding, default_log_filter,
    default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError, LogSettings};
pub use platform::{Platform, PlatformParseError};
pub use runtime::RuntimeDescriptor;
pub use server::ServerConfiguration;
