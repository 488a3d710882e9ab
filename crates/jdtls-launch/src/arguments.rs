//! Builds the JVM command line for the language server.

use camino::Utf8Path;
use jdtls_config::{Platform, RuntimeDescriptor, ServerConfiguration};

use crate::errors::LaunchError;
use crate::launcher::find_launcher_jar;
use crate::vm_args::parse_vm_args;

/// Log target for argument construction.
pub(crate) const ARGUMENTS_TARGET: &str = "jdtls_launch::arguments";

/// Ordered JVM arguments. Flag and value pairs such as `-jar <path>` are
/// adjacent.
pub type ArgumentList = Vec<String>;

const DEBUG_AGENT: &str =
    "-agentlib:jdwp=transport=dt_socket,server=y,suspend=n,address=1044,quiet=y";
const MODULE_FLAGS: [&str; 5] = [
    "--add-modules=ALL-SYSTEM",
    "--add-opens",
    "java.base/java.util=ALL-UNNAMED",
    "--add-opens",
    "java.base/java.lang=ALL-UNNAMED",
];
const PRODUCT_FLAGS: [&str; 3] = [
    "-Declipse.application=org.eclipse.jdt.ls.core.id1",
    "-Dosgi.bundles.defaultStartLevel=4",
    "-Declipse.product=org.eclipse.jdt.ls.core.product",
];
const DEBUG_LOG_LEVEL: &str = "-Dlog.level=ALL";
const ENCODING_KEY: &str = "-Dfile.encoding=";
const WATCH_PARENT_KEY: &str = "-DwatchParentProcess=";

/// Host facts that influence the command line.
///
/// Computed once by the host at startup and passed in, so building stays a
/// function of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchContext {
    /// Start the server with a remote debug agent and verbose logging.
    pub debug: bool,
    /// Platform used for Windows-only flags and the configuration directory.
    pub platform: Platform,
}

impl LaunchContext {
    /// Creates a context from explicit values.
    #[must_use]
    pub const fn new(debug: bool, platform: Platform) -> Self {
        Self { debug, platform }
    }

    /// Context for the current platform with debugging disabled.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(false, Platform::current())
    }

    /// Replaces the debug flag.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Builds the argument list for launching the language server.
///
/// The order is fixed: debug agent, module flags (Java 9+), product flags,
/// debug log level, file encoding, the Windows parent-watch switch, the
/// user's VM arguments, `-jar <launcher>`, `-configuration <dir>` and finally
/// `-data <workspace>`.
///
/// # Errors
///
/// Returns [`LaunchError::MissingLauncher`] when the launcher jar cannot be
/// found under the configured launcher root. This is the only failure; no
/// partial list is returned.
pub fn build_arguments(
    runtime: &RuntimeDescriptor,
    config: &ServerConfiguration,
    workspace: &Utf8Path,
    context: &LaunchContext,
) -> Result<ArgumentList, LaunchError> {
    let mut params = ArgumentList::new();
    if context.debug {
        params.push(DEBUG_AGENT.to_owned());
    }
    if runtime.has_module_system() {
        params.extend(MODULE_FLAGS.iter().map(|flag| (*flag).to_owned()));
    }
    params.extend(PRODUCT_FLAGS.iter().map(|flag| (*flag).to_owned()));
    if context.debug {
        params.push(DEBUG_LOG_LEVEL.to_owned());
    }

    let vm_args = config.vm_args.as_str();
    if !vm_args.contains(ENCODING_KEY) {
        params.push(format!("{ENCODING_KEY}{}", config.file_encoding));
    }
    if context.platform.is_windows() && !vm_args.contains(WATCH_PARENT_KEY) {
        params.push(format!("{WATCH_PARENT_KEY}false"));
    }
    parse_vm_args(&mut params, vm_args);

    let launcher = find_launcher_jar(config.launcher_root())?;
    params.push("-jar".to_owned());
    params.push(launcher.into_string());

    let config_dir = config
        .launcher_root()
        .join(context.platform.config_dir_name());
    params.push("-configuration".to_owned());
    params.push(config_dir.into_string());

    params.push("-data".to_owned());
    params.push(workspace.as_str().to_owned());
    Ok(params)
}
