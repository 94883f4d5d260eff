//! Top-level business logic of the SEED installer.
//!
//! The command line workflow turns parsed arguments into a
//! [`StartupConfiguration`]:
//!
//! 1. translate the arguments into paths and flags, reloading the
//!    configuration when the command line names a configuration directory
//! 2. ask the license gate whether installation may proceed
//! 3. write the license public key into the working directory
//! 4. assemble the startup configuration
//!
//! [`Installer`] then acts as the [`BusinessLogic`] driven by the runtime:
//! it collects the host facts before the main loop and shows them in the
//! status panel during it.

use std::ffi::OsString;
use std::path::PathBuf;

use colored::Colorize;
use tracing::{debug, error, info, warn};

use crate::app::lifecycle::{BusinessLogic, ReturnCode};
use crate::app::startup::{LicenseSettings, StartupConfiguration};
use crate::cli::options::OptionSchema;
use crate::cli::parser::{ArgumentParser, ParsedArguments};
use crate::cli::translator::{absolute_path, translate, TranslatedArguments};
use crate::config::InstallerConfig;
use crate::errors::{InstallerError, InstallerResult};
use crate::hardware::{HostDescriptor, HostFacts};
use crate::license::gate::{LicenseDecision, LicenseGate};
use crate::license::provisioner::provision_key;
use crate::ui::panel::{self, StatusPanel};

/// Command line resolved against the configuration it selects.
#[derive(Debug, Clone)]
pub struct ResolvedArguments {
    pub config: InstallerConfig,
    pub schema: &'static OptionSchema,
    pub args: TranslatedArguments,
}

/// Parse `argv` with the schema `config` selects and translate it.
///
/// A configuration directory on the command line replaces `config` with the
/// one loaded from that directory, and the arguments are translated again
/// against its defaults. `argv` is not re-parsed, so the schema stays the
/// one selected by the initial configuration.
pub fn resolve_arguments(
    parser: &dyn ArgumentParser,
    argv: Vec<OsString>,
    config: InstallerConfig,
) -> InstallerResult<ResolvedArguments> {
    let schema = OptionSchema::for_revision(config.schema_revision()?);
    let parsed = parser.parse(schema, argv)?;

    let mut config = config;
    let mut args = translate(&parsed, schema, &PathBuf::from(&config.paths.log_directory))?;
    if let Some(directory) = args.config_directory.clone() {
        debug!(directory = %directory.display(), "Reloading configuration");
        config = InstallerConfig::load(Some(&directory))?;
        args = translate(&parsed, schema, &PathBuf::from(&config.paths.log_directory))?;
    }

    Ok(ResolvedArguments {
        config,
        schema,
        args,
    })
}

/// Working directory for this run: `--data-directory` if given, else the configured one.
pub fn working_directory(
    args: &TranslatedArguments,
    config: &InstallerConfig,
) -> InstallerResult<PathBuf> {
    match &args.data_directory {
        Some(dir) => Ok(dir.clone()),
        None => absolute_path(&config.paths.working_directory),
    }
}

/// Run the license gate with the configured policy.
///
/// Has no side effects; call it before anything is written.
pub fn check_license(
    args: &TranslatedArguments,
    config: &InstallerConfig,
) -> InstallerResult<LicenseDecision> {
    let gate = LicenseGate::new(config.license_policy()?);
    gate.check(args.license_path.as_deref(), &working_directory(args, config)?)
}

/// Provision the key and build the startup configuration for an accepted license.
pub fn prepare(
    args: &TranslatedArguments,
    decision: LicenseDecision,
    config: &InstallerConfig,
) -> InstallerResult<StartupConfiguration> {
    if !decision.required {
        warn!(
            placeholder = %decision.license_path.display(),
            "No license supplied; continuing without license enforcement"
        );
    } else if !decision.license_path.is_file() {
        warn!(license = %decision.license_path.display(), "License file does not exist");
    } else {
        info!(license = %decision.license_path.display(), "License file found");
    }

    let working_directory = working_directory(args, config)?;
    let key_path = provision_key(&working_directory, true)?;

    StartupConfiguration::builder()
        .working_directory(working_directory, true)
        .log_directory(args.log_directory.clone(), true)
        .debug_mode(args.debug_mode)
        .license(LicenseSettings {
            required: decision.required,
            key_path,
            license_path: decision.license_path,
            decryption_key: args.decryption_key.clone(),
        })
        .telemetry_endpoint(config.telemetry.endpoint.clone())
        .build()
}

/// Whole command line workflow: translate, gate, provision, build.
pub fn process_command_line(
    parsed: &ParsedArguments,
    schema: &OptionSchema,
    config: &InstallerConfig,
) -> InstallerResult<StartupConfiguration> {
    let default_log_directory = PathBuf::from(&config.paths.log_directory);
    let args = translate(parsed, schema, &default_log_directory)?;
    let decision = check_license(&args, config)?;
    prepare(&args, decision, config)
}

/// The installer's [`BusinessLogic`].
pub struct Installer {
    host: Box<dyn HostDescriptor>,
    host_facts: Option<HostFacts>,
    interactive: bool,
    telemetry_endpoint: Option<String>,
}

impl Installer {
    pub fn new(host: Box<dyn HostDescriptor>) -> Self {
        Self {
            host,
            host_facts: None,
            interactive: false,
            telemetry_endpoint: None,
        }
    }

    /// Show the full-screen panel in the main loop instead of printing a summary.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Host facts collected in `before_main_loop`.
    pub fn host_facts(&self) -> Option<&HostFacts> {
        self.host_facts.as_ref()
    }

    fn print_summary(facts: &HostFacts) {
        let panel = StatusPanel::new(facts.clone());
        for (label, value) in panel.fact_lines() {
            println!("{:<18}{}", format!("{label}:"), value);
        }
    }
}

impl BusinessLogic for Installer {
    fn initialize_services(&mut self, config: &StartupConfiguration) -> InstallerResult<()> {
        debug!(
            key = %config.license().key_path.display(),
            license = %config.license().license_path.display(),
            required = config.license_required(),
            "License settings"
        );
        self.telemetry_endpoint = Some(config.telemetry_endpoint().to_string());
        Ok(())
    }

    fn before_main_loop(&mut self) -> InstallerResult<()> {
        let facts = self.host.current()?;
        info!(
            cpu = %facts.cpu_name,
            memory_mb = facts.memory_mb(),
            os = %facts.os_name,
            os_version = %facts.os_version,
            "Host facts collected"
        );
        self.host_facts = Some(facts);
        Ok(())
    }

    fn main_loop(&mut self) -> InstallerResult<ReturnCode> {
        let facts = self.host_facts.clone().ok_or_else(|| {
            InstallerError::Lifecycle("host facts were not collected".to_string())
        })?;

        if self.interactive {
            panel::run_interactive(facts)
        } else {
            Self::print_summary(&facts);
            Ok(ReturnCode::Success)
        }
    }

    fn after_main_loop(&mut self) -> InstallerResult<()> {
        info!("Installer main loop finished");
        Ok(())
    }

    fn on_uncaught_exception(&mut self, error: &InstallerError) -> ReturnCode {
        error!(
            error = %error,
            telemetry_endpoint = self.telemetry_endpoint.as_deref().unwrap_or("none"),
            "Uncaught error, aborting"
        );
        eprintln!("{}", format!("<ERROR> - {}", error.user_message()).red());
        ReturnCode::UncaughtError
    }
}
