//! Launches the Eclipse JDT language server and accepts its socket.
#![deny(missing_docs)]
//!
//! The crate has two independent halves. The first turns a located Java
//! runtime and the user's server configuration into an
//! [`ExecutableDescriptor`]: an absolute `java` path, an ordered argument list
//! and the inherited environment, ready for the host's process spawner. The
//! second, [`ConnectionAwaiter`], opens a single-use TCP listener and resolves
//! to a duplex [`ServerConnection`] once the spawned server dials back.
//!
//! Neither half spawns or supervises the process, and nothing here speaks the
//! language server protocol; both are the host's concern.

mod arguments;
mod connection;
mod debug;
mod errors;
mod executable;
mod launcher;
pub mod telemetry;
mod vm_args;

pub use arguments::{ArgumentList, LaunchContext, build_arguments};
pub use connection::{
    ConnectionAwaiter, ServerConnection, await_server_connection, await_server_connection_str,
    parse_port,
};
pub use debug::{started_in_debug_mode, started_in_debug_mode_from_env};
pub use errors::{ConnectionError, LaunchError};
pub use executable::{ExecutableDescriptor, IoMode, JAVA_BINARY, prepare_executable};
pub use launcher::{LAUNCHER_PATTERN, find_launcher_jar};
pub use vm_args::{parse_vm_args, tokenize_vm_args, unescape_vm_arg};

#[cfg(test)]
mod tests;
