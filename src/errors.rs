//! Error types for the SEED installer.
//!
//! Every failure in the installer is fatal at the process level. Each error
//! maps onto a [`ReturnCode`] so `main` can terminate with a status that
//! identifies the failure class.

use clap::error::ErrorKind;
use thiserror::Error;

use crate::app::lifecycle::ReturnCode;

/// All errors the installer can surface.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The process is not running with root privileges.
    #[error("the SEED installer has to be executed with root privileges")]
    PrivilegeRequired,

    /// Something the installer depends on is not available on this host.
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    /// No usable license was supplied.
    #[error("invalid license: {0}")]
    InvalidLicense(String),

    /// Filesystem failure while writing the key or creating directories.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Command line parsing failed, or `--help` / `--version` was requested.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// HTTP failure while probing the host's public address.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Terminal setup, drawing or input failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// A lifecycle hook failed.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),
}

impl InstallerError {
    /// The process return code for this error.
    pub fn return_code(&self) -> ReturnCode {
        match self {
            InstallerError::PrivilegeRequired => ReturnCode::PrivilegeRequired,
            InstallerError::MissingDependency(_) => ReturnCode::MissingDependency,
            InstallerError::InvalidLicense(_) => ReturnCode::InvalidLicense,
            InstallerError::Storage(_) => ReturnCode::FilesystemError,
            InstallerError::ConfigError(_) => ReturnCode::ConfigurationError,
            InstallerError::Cli(e) => match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ReturnCode::Success,
                _ => ReturnCode::Failure,
            },
            InstallerError::Network(_)
            | InstallerError::Terminal(_)
            | InstallerError::Lifecycle(_) => ReturnCode::UncaughtError,
        }
    }

    /// Message shown to the operator on the terminal.
    pub fn user_message(&self) -> String {
        match self {
            InstallerError::PrivilegeRequired => {
                "The SEED installer has to be executed with root privileges.".to_string()
            }
            InstallerError::MissingDependency(what) => {
                format!("The SEED installer cannot run on this host: {what}.")
            }
            InstallerError::InvalidLicense(_) => {
                "A valid license file is required to run the SEED installer.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type InstallerResult<T> = Result<T, InstallerError>;
