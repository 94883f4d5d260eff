use std::io::IsTerminal;
use std::process::ExitCode;

use colored::Colorize;
use tracing::info;

use seed_installer::app::lifecycle::ReturnCode;
use seed_installer::app::runtime::{ApplicationRuntime, CliApplication};
use seed_installer::cli::parser::ClapArgumentParser;
use seed_installer::config::InstallerConfig;
use seed_installer::errors::{InstallerError, InstallerResult};
use seed_installer::hardware::SystemHostDescriptor;
use seed_installer::installer::{self, Installer, ResolvedArguments};
use seed_installer::{logging, preflight, version};

/// Entry point of the SEED installer.
///
/// Order matters: privileges are checked before anything else, and the
/// license gate runs before logging so a rejected run writes nothing.
fn run() -> InstallerResult<ReturnCode> {
    preflight::run()?;

    let ResolvedArguments { config, args, .. } = installer::resolve_arguments(
        &ClapArgumentParser,
        std::env::args_os().collect(),
        InstallerConfig::load(None)?,
    )?;

    let decision = installer::check_license(&args, &config)?;

    let log_file = logging::init(&args.log_directory, &config.logging.level, args.debug_mode)?;
    info!(
        version = %version::long_version(),
        scm_id = version::SCM_ID,
        log_file = %log_file.display(),
        policy = %config.license_policy()?,
        "SEED installer starting"
    );

    let startup = installer::prepare(&args, decision, &config)?;

    let interactive = config.ui.status_panel && std::io::stdout().is_terminal();
    let mut logic = Installer::new(Box::new(SystemHostDescriptor::new(config.network.clone())))
        .with_interactive(interactive);

    CliApplication::new().execute(startup, &mut logic)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code.into(),
        Err(e) => {
            match &e {
                // clap renders help, version and usage errors itself.
                InstallerError::Cli(cli) => {
                    let _ = cli.print();
                }
                other => eprintln!("{}", format!("<ERROR> - {}", other.user_message()).red()),
            }
            e.return_code().into()
        }
    }
}
