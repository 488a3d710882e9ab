//! Unit tests for the argument builder and executable assembler.

use camino::Utf8Path;
use jdtls_config::{Platform, RuntimeDescriptor, ServerConfiguration};
use rstest::{fixture, rstest};

use crate::errors::LaunchError;
use crate::executable::{IoMode, prepare_executable};
use crate::tests::support::{Distribution, position_of, value_after};
use crate::{LaunchContext, build_arguments};

const WORKSPACE: &str = "/home/dev/.cache/jdtls/workspace";

#[fixture]
fn distribution() -> Distribution {
    Distribution::with_launcher()
}

fn runtime(major_version: u32) -> RuntimeDescriptor {
    RuntimeDescriptor::new("/usr/lib/jvm/jdk", major_version)
}

fn linux() -> LaunchContext {
    LaunchContext::new(false, Platform::Linux)
}

fn build(
    distribution: &Distribution,
    major_version: u32,
    vm_args: &str,
    context: LaunchContext,
) -> Vec<String> {
    let config = ServerConfiguration::new(distribution.root()).with_vm_args(vm_args);
    build_arguments(
        &runtime(major_version),
        &config,
        Utf8Path::new(WORKSPACE),
        &context,
    )
    .expect("arguments should build")
}

#[rstest]
fn produces_full_command_line_in_order(distribution: Distribution) {
    let params = build(&distribution, 17, "-Xmx1G", linux());

    let expected = vec![
        "--add-modules=ALL-SYSTEM".to_owned(),
        "--add-opens".to_owned(),
        "java.base/java.util=ALL-UNNAMED".to_owned(),
        "--add-opens".to_owned(),
        "java.base/java.lang=ALL-UNNAMED".to_owned(),
        "-Declipse.application=org.eclipse.jdt.ls.core.id1".to_owned(),
        "-Dosgi.bundles.defaultStartLevel=4".to_owned(),
        "-Declipse.product=org.eclipse.jdt.ls.core.product".to_owned(),
        "-Dfile.encoding=UTF-8".to_owned(),
        "-Xmx1G".to_owned(),
        "-jar".to_owned(),
        distribution.launcher_path(),
        "-configuration".to_owned(),
        distribution.root().join("config_linux").into_string(),
        "-data".to_owned(),
        WORKSPACE.to_owned(),
    ];
    assert_eq!(params, expected);
}

#[rstest]
fn java_eleven_opens_modules(distribution: Distribution) {
    let params = build(&distribution, 11, "", linux());

    assert!(params.contains(&"--add-modules=ALL-SYSTEM".to_owned()));
    assert!(params.contains(&"java.base/java.util=ALL-UNNAMED".to_owned()));
    assert!(params.contains(&"java.base/java.lang=ALL-UNNAMED".to_owned()));
    assert_eq!(
        params.iter().filter(|param| *param == "--add-opens").count(),
        2
    );
}

#[rstest]
fn java_eight_has_no_module_flags(distribution: Distribution) {
    let params = build(&distribution, 8, "", linux());

    assert!(!params.iter().any(|param| param.starts_with("--add-")));
    assert!(!params.iter().any(|param| param.ends_with("=ALL-UNNAMED")));
}

#[rstest]
fn debug_adds_agent_first_and_log_level(distribution: Distribution) {
    let params = build(&distribution, 17, "", linux().with_debug(true));

    assert_eq!(
        params.first().map(String::as_str),
        Some("-agentlib:jdwp=transport=dt_socket,server=y,suspend=n,address=1044,quiet=y")
    );
    let log_level = position_of(&params, "-Dlog.level=ALL");
    let product = position_of(&params, "-Declipse.product=org.eclipse.jdt.ls.core.product");
    assert_eq!(log_level, product + 1);
}

#[rstest]
fn user_encoding_suppresses_default(distribution: Distribution) {
    let params = build(&distribution, 17, "-Dfile.encoding=Cp1252", linux());

    let encodings: Vec<_> = params
        .iter()
        .filter(|param| param.starts_with("-Dfile.encoding="))
        .collect();
    assert_eq!(encodings, vec!["-Dfile.encoding=Cp1252"]);
}

#[rstest]
fn configured_encoding_is_used(distribution: Distribution) {
    let config = ServerConfiguration::new(distribution.root()).with_file_encoding("ISO-8859-1");

    let params = build_arguments(
        &runtime(17),
        &config,
        Utf8Path::new(WORKSPACE),
        &linux(),
    )
    .expect("arguments should build");

    assert!(params.contains(&"-Dfile.encoding=ISO-8859-1".to_owned()));
}

#[rstest]
#[case(Platform::Windows, "", true)]
#[case(Platform::Windows, "-DwatchParentProcess=true", false)]
#[case(Platform::Linux, "", false)]
#[case(Platform::MacOs, "", false)]
fn watch_parent_switch_is_windows_only(
    distribution: Distribution,
    #[case] platform: Platform,
    #[case] vm_args: &str,
    #[case] expect_default: bool,
) {
    let params = build(&distribution, 17, vm_args, LaunchContext::new(false, platform));

    assert_eq!(
        params.contains(&"-DwatchParentProcess=false".to_owned()),
        expect_default
    );
}

#[rstest]
fn user_flags_duplicating_builtins_are_dropped(distribution: Distribution) {
    let params = build(
        &distribution,
        17,
        "-Dosgi.bundles.defaultStartLevel=4 -Xmx1G -Xmx1G",
        linux(),
    );

    assert_eq!(
        params
            .iter()
            .filter(|param| *param == "-Dosgi.bundles.defaultStartLevel=4")
            .count(),
        1
    );
    assert_eq!(params.iter().filter(|param| *param == "-Xmx1G").count(), 1);
    assert!(position_of(&params, "-Xmx1G") < position_of(&params, "-jar"));
}

#[rstest]
#[case(Platform::Windows, "config_win")]
#[case(Platform::MacOs, "config_mac")]
#[case(Platform::Linux, "config_linux")]
#[case(Platform::Other, "config_win")]
fn configuration_directory_follows_platform(
    distribution: Distribution,
    #[case] platform: Platform,
    #[case] directory: &str,
) {
    let params = build(&distribution, 17, "", LaunchContext::new(false, platform));

    assert_eq!(
        value_after(&params, "-configuration"),
        distribution.root().join(directory).as_str()
    );
}

#[rstest]
fn workspace_and_launcher_are_adjacent_pairs(distribution: Distribution) {
    let params = build(&distribution, 17, "", linux());

    assert_eq!(value_after(&params, "-jar"), distribution.launcher_path());
    assert_eq!(value_after(&params, "-data"), WORKSPACE);
    assert_eq!(params.last().map(String::as_str), Some(WORKSPACE));
}

#[rstest]
#[case(8, "")]
#[case(17, "-Dfile.encoding=UTF-8 -Xmx2G")]
fn missing_launcher_fails_regardless_of_inputs(#[case] major_version: u32, #[case] vm_args: &str) {
    let distribution = Distribution::empty();
    distribution.add_file("plugins/org.eclipse.jdt.ls.core_1.30.0.jar");
    let config = ServerConfiguration::new(distribution.root()).with_vm_args(vm_args);

    let error = build_arguments(
        &runtime(major_version),
        &config,
        Utf8Path::new(WORKSPACE),
        &LaunchContext::new(true, Platform::Windows),
    )
    .expect_err("launcher is missing");

    assert!(matches!(error, LaunchError::MissingLauncher { .. }));
}

#[rstest]
fn executable_points_at_runtime_java(distribution: Distribution) {
    let config = ServerConfiguration::new(distribution.root());

    let executable = prepare_executable(
        &runtime(17),
        Utf8Path::new(WORKSPACE),
        &config,
        &linux(),
    )
    .expect("executable should assemble");

    assert!(executable.command.is_absolute());
    assert!(executable.command.ends_with("jdk/bin/java"));
    assert_eq!(executable.io_mode, IoMode::Piped);
    assert_eq!(value_after(&executable.arguments, "-data"), WORKSPACE);
}

#[rstest]
fn executable_inherits_environment(distribution: Distribution) {
    let config = ServerConfiguration::new(distribution.root());

    let executable = prepare_executable(
        &runtime(17),
        Utf8Path::new(WORKSPACE),
        &config,
        &linux(),
    )
    .expect("executable should assemble");

    let expected: std::collections::BTreeMap<String, String> = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect();
    assert_eq!(executable.environment, expected);
}

#[rstest]
fn executable_propagates_missing_launcher() {
    let distribution = Distribution::empty();
    let config = ServerConfiguration::new(distribution.root());

    let error = prepare_executable(
        &runtime(17),
        Utf8Path::new(WORKSPACE),
        &config,
        &linux(),
    )
    .expect_err("launcher is missing");

    assert!(matches!(error, LaunchError::MissingLauncher { .. }));
}
