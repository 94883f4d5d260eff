//! End-to-end tests of the command line workflow and the runtime.
//!
//! The working directory is redirected into a temporary directory so the
//! tests do not need root or write to `/opt/seed/installer/`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use seed_installer::app::lifecycle::ReturnCode;
use seed_installer::app::runtime::{ApplicationRuntime, CliApplication};
use seed_installer::cli::options::{OptionSchema, SchemaRevision, SCHEMA_V1, SCHEMA_V2};
use seed_installer::cli::parser::{ArgumentParser, ClapArgumentParser};
use seed_installer::config::InstallerConfig;
use seed_installer::constants::SEED_LICENSE_PUBLIC_KEY;
use seed_installer::errors::{InstallerError, InstallerResult};
use seed_installer::hardware::{HostDescriptor, HostFacts};
use seed_installer::installer::{
    process_command_line, resolve_arguments, working_directory, Installer,
};

struct FakeHost {
    memory_bytes: u64,
}

impl HostDescriptor for FakeHost {
    fn current(&self) -> InstallerResult<HostFacts> {
        Ok(HostFacts {
            cpu_name: "Fake CPU".to_string(),
            cpu_cores: 2,
            memory_bytes: self.memory_bytes,
            public_ip: Some("198.51.100.1".to_string()),
            host_name: "fake".to_string(),
            os_name: "Linux".to_string(),
            os_version: "1.0".to_string(),
            kernel_version: "6.0".to_string(),
            runtime_version: "rustc".to_string(),
        })
    }
}

struct FailingHost;

impl HostDescriptor for FailingHost {
    fn current(&self) -> InstallerResult<HostFacts> {
        Err(InstallerError::Terminal("host lookup failed".to_string()))
    }
}

fn argv(args: &[&str]) -> Vec<OsString> {
    std::iter::once("seed-installer")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

fn config_with_work(work: &Path, policy: &str) -> InstallerConfig {
    let mut config = InstallerConfig::default();
    config.paths.working_directory = work.display().to_string();
    config.license.policy = policy.to_string();
    config
}

#[test]
fn end_to_end_strict_with_license() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("opt/seed/installer");
    let config = config_with_work(&work, "strict");
    let schema = OptionSchema::for_revision(config.schema_revision().unwrap());

    let parsed = ClapArgumentParser
        .parse(
            schema,
            argv(&["--license-key", "/tmp/my.lic", "--log-directory", "/tmp/logs", "--debug"]),
        )
        .unwrap();

    let startup = process_command_line(&parsed, schema, &config).unwrap();

    assert!(startup.debug_mode());
    assert_eq!(startup.log_directory(), Path::new("/tmp/logs"));
    assert_eq!(startup.license().license_path, PathBuf::from("/tmp/my.lic"));
    assert!(startup.license_required());
    assert_eq!(startup.working_directory(), work.as_path());
    assert_eq!(startup.license().key_path, work.join("license.pem"));
    assert_eq!(
        fs::read_to_string(work.join("license.pem")).unwrap(),
        SEED_LICENSE_PUBLIC_KEY
    );
}

#[test]
fn strict_without_license_key_is_rejected_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("installer");
    let config = config_with_work(&work, "strict");

    let parsed = ClapArgumentParser
        .parse(&SCHEMA_V2, argv(&["--log-directory", "/tmp/logs"]))
        .unwrap();

    let err = process_command_line(&parsed, &SCHEMA_V2, &config).unwrap_err();
    assert!(matches!(err, InstallerError::InvalidLicense(_)));
    assert_eq!(err.return_code(), ReturnCode::InvalidLicense);
    assert!(!work.exists());
}

#[test]
fn permissive_without_license_key_still_writes_key() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("installer");
    fs::create_dir_all(&work).unwrap();
    fs::write(work.join("license.pem"), "stale contents that are much longer than nothing").unwrap();
    let config = config_with_work(&work, "permissive");

    let parsed = ClapArgumentParser.parse(&SCHEMA_V2, argv(&[])).unwrap();
    let startup = process_command_line(&parsed, &SCHEMA_V2, &config).unwrap();

    assert!(!startup.license_required());
    assert_eq!(
        startup.license().license_path,
        work.join("license.placeholder")
    );
    assert_eq!(startup.log_directory(), Path::new("/var/logs/seed/"));
    assert!(!startup.debug_mode());
    assert_eq!(
        fs::read(work.join("license.pem")).unwrap(),
        SEED_LICENSE_PUBLIC_KEY.as_bytes()
    );
}

#[test]
fn revision_one_schema_maps_data_directory_and_key() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    let mut config = config_with_work(&dir.path().join("unused"), "permissive");
    config.cli.schema_revision = 1;
    assert_eq!(config.schema_revision().unwrap(), SchemaRevision::V1);

    let data_arg = data.display().to_string();
    let parsed = ClapArgumentParser
        .parse(
            &SCHEMA_V1,
            argv(&["--data-directory", &data_arg, "--key", "s3cret", "-d"]),
        )
        .unwrap();

    let startup = process_command_line(&parsed, &SCHEMA_V1, &config).unwrap();

    assert_eq!(startup.working_directory(), data.as_path());
    assert_eq!(startup.license().decryption_key.as_deref(), Some("s3cret"));
    assert!(startup.debug_mode());
    assert!(data.join("license.pem").is_file());
    assert!(!dir.path().join("unused").exists());
}

#[test]
fn runtime_runs_installer_to_success() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("installer");
    let logs = dir.path().join("logs");
    let config = config_with_work(&work, "strict");

    let logs_arg = logs.display().to_string();
    let parsed = ClapArgumentParser
        .parse(&SCHEMA_V2, argv(&["-k", "/tmp/node.lic", "-l", &logs_arg]))
        .unwrap();
    let startup = process_command_line(&parsed, &SCHEMA_V2, &config).unwrap();

    let mut installer = Installer::new(Box::new(FakeHost {
        memory_bytes: 17_179_869_184,
    }));
    let mut app = CliApplication::new();
    let code = app.execute(startup, &mut installer).unwrap();

    assert_eq!(code, ReturnCode::Success);
    assert!(logs.is_dir());
    assert_eq!(installer.host_facts().unwrap().memory_mb(), 16_384);
    assert_eq!(app.config().unwrap().log_directory(), logs.as_path());
}

#[test]
fn host_lookup_failure_is_reported_as_uncaught() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("installer");
    let logs = dir.path().join("logs");
    let config = config_with_work(&work, "permissive");

    let logs_arg = logs.display().to_string();
    let parsed = ClapArgumentParser
        .parse(&SCHEMA_V2, argv(&["-l", &logs_arg]))
        .unwrap();
    let startup = process_command_line(&parsed, &SCHEMA_V2, &config).unwrap();

    let mut installer = Installer::new(Box::new(FailingHost));
    let code = CliApplication::new()
        .execute(startup, &mut installer)
        .unwrap();

    assert_eq!(code, ReturnCode::UncaughtError);
    assert!(installer.host_facts().is_none());
}

#[test]
fn config_directory_flag_reloads_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let conf = dir.path().join("etc/seed");
    let work = dir.path().join("srv/seed");
    let logs = dir.path().join("srv/logs");
    fs::create_dir_all(&conf).unwrap();
    fs::write(
        conf.join("installer.toml"),
        format!(
            "[paths]\nworking_directory = '{}'\nlog_directory = '{}'\n\n\
             [license]\npolicy = 'permissive'\n\n[cli]\nschema_revision = 1\n",
            work.display(),
            logs.display()
        ),
    )
    .unwrap();

    let mut initial = config_with_work(&dir.path().join("unused"), "permissive");
    initial.cli.schema_revision = 1;

    let conf_arg = conf.display().to_string();
    let resolved =
        resolve_arguments(&ClapArgumentParser, argv(&["-c", &conf_arg]), initial).unwrap();

    assert_eq!(resolved.schema.revision, SchemaRevision::V1);
    assert_eq!(resolved.args.config_directory.as_deref(), Some(conf.as_path()));
    assert_eq!(resolved.args.log_directory, logs);
    assert_eq!(
        working_directory(&resolved.args, &resolved.config).unwrap(),
        work
    );
}

#[test]
fn without_config_directory_the_given_configuration_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_work(dir.path(), "strict");

    let resolved = resolve_arguments(
        &ClapArgumentParser,
        argv(&["-k", "/tmp/my.lic"]),
        config,
    )
    .unwrap();

    assert_eq!(resolved.schema.revision, SchemaRevision::V2);
    assert_eq!(resolved.args.log_directory, PathBuf::from("/var/logs/seed/"));
    assert_eq!(resolved.config.paths.working_directory, dir.path().display().to_string());
}

#[test]
fn usage_errors_exit_with_failure_not_privilege_code() {
    let config = InstallerConfig::default();

    let err = resolve_arguments(&ClapArgumentParser, argv(&["--bogus"]), config.clone())
        .unwrap_err();
    assert!(matches!(err, InstallerError::Cli(_)));
    assert_eq!(err.return_code(), ReturnCode::Failure);
    assert_eq!(err.return_code().code(), 1);

    let help = resolve_arguments(&ClapArgumentParser, argv(&["--help"]), config).unwrap_err();
    assert_eq!(help.return_code(), ReturnCode::Success);
}
