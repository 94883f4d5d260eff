//! Lifecycle hooks invoked by the application runtime.
//!
//! During one execution the runtime calls, in order:
//!
//! ```text
//! initialize_services(config) -> before_main_loop() -> main_loop() -> after_main_loop()
//! ```
//!
//! `after_main_loop` only runs when `main_loop` returned normally. If any
//! hook fails, the remaining hooks are skipped and `on_uncaught_exception`
//! decides the process return code.

use std::fmt;

use crate::app::startup::StartupConfiguration;
use crate::errors::{InstallerError, InstallerResult};

/// Process return codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReturnCode {
    Success = 0,
    Failure = 1,
    PrivilegeRequired = 2,
    MissingDependency = 3,
    InvalidLicense = 4,
    FilesystemError = 5,
    UncaughtError = 6,
    ConfigurationError = 7,
}

impl ReturnCode {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        self == ReturnCode::Success
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

impl From<ReturnCode> for std::process::ExitCode {
    fn from(code: ReturnCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}

/// Top-level business logic driven by an [`ApplicationRuntime`].
///
/// [`ApplicationRuntime`]: crate::app::runtime::ApplicationRuntime
pub trait BusinessLogic {
    /// Called once the runtime has prepared directories and logging.
    fn initialize_services(&mut self, config: &StartupConfiguration) -> InstallerResult<()>;

    /// Called before the main loop is entered.
    fn before_main_loop(&mut self) -> InstallerResult<()>;

    /// The main body of the application; its code becomes the process status.
    fn main_loop(&mut self) -> InstallerResult<ReturnCode>;

    /// Called after the main loop returned normally.
    fn after_main_loop(&mut self) -> InstallerResult<()>;

    /// Called instead of the remaining hooks when one of them failed.
    fn on_uncaught_exception(&mut self, error: &InstallerError) -> ReturnCode;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ReturnCode::Success.code(), 0);
        assert_eq!(ReturnCode::InvalidLicense.code(), 4);
        assert_eq!(ReturnCode::ConfigurationError.code(), 7);
        assert!(ReturnCode::Success.is_success());
        assert!(!ReturnCode::Failure.is_success());
    }

    #[test]
    fn display_includes_code() {
        assert_eq!(format!("{}", ReturnCode::UncaughtError), "UncaughtError (6)");
    }
}
