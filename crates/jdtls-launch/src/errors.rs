//! Error types surfaced while preparing or connecting to the server.

use std::io;
use std::net::SocketAddr;
use std::num::ParseIntError;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while assembling the server command line.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No Equinox launcher jar exists under the server distribution root.
    #[error("no launcher jar matching '{pattern}' found under '{root}'")]
    MissingLauncher {
        /// Directory that was searched.
        root: Utf8PathBuf,
        /// Glob the search used.
        pattern: &'static str,
    },

    /// The launcher glob could not be compiled.
    #[error("invalid launcher pattern '{pattern}': {source}")]
    LauncherPattern {
        /// Offending pattern.
        pattern: &'static str,
        /// Underlying glob error.
        #[source]
        source: globset::Error,
    },

    /// A relative path could not be made absolute.
    #[error("failed to resolve absolute path for '{path}': {source}")]
    ResolvePath {
        /// Path being resolved.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A resolved path is not valid UTF-8 and cannot be passed as an argument.
    #[error("path '{}' is not valid UTF-8", path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },
}

/// Errors raised while waiting for the server to connect.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The port was not a base-10 number in range.
    #[error("invalid port '{input}': {source}")]
    InvalidPort {
        /// Text supplied by the caller.
        input: String,
        /// Underlying parse failure.
        #[source]
        source: ParseIntError,
    },

    /// The listener could not be bound.
    #[error("failed to bind TCP listener at {addr}: {source}")]
    Bind {
        /// Address the listener tried to bind.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The bound address could not be read back from the socket.
    #[error("failed to read listener address: {source}")]
    LocalAddress {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The listener failed before any connection arrived.
    #[error("failed to accept connection on port {port}: {source}")]
    Accept {
        /// Port the listener was bound to.
        port: u16,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
