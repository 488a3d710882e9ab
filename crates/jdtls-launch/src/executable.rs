//! Wraps the argument list into a launch description for the host spawner.

use std::collections::BTreeMap;
use std::env;
use std::process::{Command, Stdio};

use camino::{Utf8Path, Utf8PathBuf};
use jdtls_config::{RuntimeDescriptor, ServerConfiguration};
use tracing::info;

use crate::arguments::{ArgumentList, LaunchContext, build_arguments};
use crate::errors::LaunchError;
use crate::launcher::absolute_utf8;

const EXECUTABLE_TARGET: &str = "jdtls_launch::executable";

/// Name of the Java launcher inside `<install_path>/bin`.
pub const JAVA_BINARY: &str = "java";

/// How the spawner should wire the child's standard streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IoMode {
    /// stdin, stdout and stderr are pipes owned by the spawner.
    #[default]
    Piped,
}

/// Everything the host needs to spawn the language server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableDescriptor {
    /// Absolute path to the `java` binary.
    pub command: Utf8PathBuf,
    /// Arguments in launch order.
    pub arguments: ArgumentList,
    /// Environment for the child, copied from this process.
    pub environment: BTreeMap<String, String>,
    /// Standard stream handling.
    pub io_mode: IoMode,
}

impl ExecutableDescriptor {
    /// The command followed by its arguments, space separated.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.command.to_string();
        for argument in &self.arguments {
            line.push(' ');
            line.push_str(argument);
        }
        line
    }

    /// Converts the descriptor into a [`Command`] ready to spawn.
    ///
    /// The child sees exactly [`Self::environment`].
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(self.command.as_std_path());
        command
            .args(&self.arguments)
            .env_clear()
            .envs(&self.environment);
        match self.io_mode {
            IoMode::Piped => {
                command
                    .stdin(Stdio::piped())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
            }
        }
        command
    }
}

/// Assembles the launch description for the language server.
///
/// # Errors
///
/// Propagates [`LaunchError::MissingLauncher`] from [`build_arguments`], and
/// fails when the `java` path cannot be made absolute.
pub fn prepare_executable(
    runtime: &RuntimeDescriptor,
    workspace: &Utf8Path,
    config: &ServerConfiguration,
    context: &LaunchContext,
) -> Result<ExecutableDescriptor, LaunchError> {
    let binary = runtime.install_path.join("bin").join(JAVA_BINARY);
    let command = absolute_utf8(binary.as_std_path())?;
    let arguments = build_arguments(runtime, config, workspace, context)?;
    let descriptor = ExecutableDescriptor {
        command,
        arguments,
        environment: inherited_environment(),
        io_mode: IoMode::Piped,
    };

    info!(
        target: EXECUTABLE_TARGET,
        command = %descriptor.command,
        argument_count = descriptor.arguments.len(),
        "starting Java server with: {}",
        descriptor.command_line()
    );
    Ok(descriptor)
}

fn inherited_environment() -> BTreeMap<String, String> {
    env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
