//! Application runtime.
//!
//! [`CliApplication`] takes ownership of the [`StartupConfiguration`],
//! prepares the working and log directories and drives the
//! [`BusinessLogic`] hooks in their fixed order.

use std::fs;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::app::lifecycle::{BusinessLogic, ReturnCode};
use crate::app::startup::StartupConfiguration;
use crate::errors::{InstallerError, InstallerResult};

/// Runs business logic under a startup configuration.
pub trait ApplicationRuntime {
    /// Execute the hooks and return the process status.
    ///
    /// Errors from the hooks are routed through
    /// [`BusinessLogic::on_uncaught_exception`]; only failures that happen
    /// before the first hook are returned as `Err`.
    fn execute(
        &mut self,
        config: StartupConfiguration,
        logic: &mut dyn BusinessLogic,
    ) -> InstallerResult<ReturnCode>;
}

/// Make sure `path` is a directory, creating it when allowed.
fn prepare_directory(path: &Path, force_create: bool, what: &str) -> InstallerResult<()> {
    if path.is_dir() {
        return Ok(());
    }
    if force_create {
        fs::create_dir_all(path)?;
        debug!(directory = %path.display(), "Created {}", what);
        return Ok(());
    }
    Err(InstallerError::Storage(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("{} {} does not exist", what, path.display()),
    )))
}

/// Command line application runtime.
#[derive(Debug, Default)]
pub struct CliApplication {
    config: Option<StartupConfiguration>,
}

impl CliApplication {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration of the current or last execution.
    pub fn config(&self) -> Option<&StartupConfiguration> {
        self.config.as_ref()
    }

    fn run_hooks(
        config: &StartupConfiguration,
        logic: &mut dyn BusinessLogic,
    ) -> InstallerResult<ReturnCode> {
        logic.initialize_services(config)?;
        logic.before_main_loop()?;
        let code = logic.main_loop()?;
        logic.after_main_loop()?;
        Ok(code)
    }
}

impl ApplicationRuntime for CliApplication {
    fn execute(
        &mut self,
        config: StartupConfiguration,
        logic: &mut dyn BusinessLogic,
    ) -> InstallerResult<ReturnCode> {
        prepare_directory(
            config.working_directory(),
            config.force_create_working_directory(),
            "working directory",
        )?;
        prepare_directory(
            config.log_directory(),
            config.force_create_log_directory(),
            "log directory",
        )?;

        info!(
            working_directory = %config.working_directory().display(),
            log_directory = %config.log_directory().display(),
            debug = config.debug_mode(),
            license_required = config.license_required(),
            "Starting application"
        );

        let config = self.config.insert(config);

        let code = match Self::run_hooks(config, logic) {
            Ok(code) => code,
            Err(e) => {
                error!(error = %e, "Unhandled error in application hooks");
                logic.on_uncaught_exception(&e)
            }
        };

        if code.is_success() {
            info!(code = %code, "Application finished");
        } else {
            warn!(code = %code, "Application finished with a failure status");
        }
        Ok(code)
    }
}
