//! License gate.
//!
//! Decides whether installation may proceed. Only the presence of a license
//! path is enforced here; validating the file is left to the licensing
//! runtime. The gate has no side effects, so a rejected run leaves the
//! filesystem untouched.
//!
//! Two policies exist and exactly one is active per run:
//!
//! - [`LicensePolicy::Strict`] (default): no license path is fatal.
//! - [`LicensePolicy::Permissive`]: a placeholder path is substituted and the
//!   license is marked as not required.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants::PLACEHOLDER_LICENSE_FILE;
use crate::errors::{InstallerError, InstallerResult};

/// License enforcement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LicensePolicy {
    #[default]
    Strict,
    Permissive,
}

impl FromStr for LicensePolicy {
    type Err = InstallerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(LicensePolicy::Strict),
            "permissive" => Ok(LicensePolicy::Permissive),
            other => Err(InstallerError::ConfigError(format!(
                "license.policy must be 'strict' or 'permissive', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for LicensePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicensePolicy::Strict => write!(f, "strict"),
            LicensePolicy::Permissive => write!(f, "permissive"),
        }
    }
}

/// Outcome of a successful gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseDecision {
    /// Whether the runtime must validate the license.
    pub required: bool,
    pub license_path: PathBuf,
}

#[derive(Debug, Clone, Copy)]
pub struct LicenseGate {
    policy: LicensePolicy,
}

impl LicenseGate {
    pub fn new(policy: LicensePolicy) -> Self {
        Self { policy }
    }

    /// Check the license path supplied on the command line.
    ///
    /// `working_directory` is where the permissive placeholder lives.
    pub fn check(
        &self,
        license_path: Option<&Path>,
        working_directory: &Path,
    ) -> InstallerResult<LicenseDecision> {
        match (self.policy, license_path) {
            (LicensePolicy::Strict, None) => Err(InstallerError::InvalidLicense(
                "A valid license key is required to install a SEED node.".to_string(),
            )),
            (LicensePolicy::Permissive, None) => Ok(LicenseDecision {
                required: false,
                license_path: working_directory.join(PLACEHOLDER_LICENSE_FILE),
            }),
            (_, Some(path)) => Ok(LicenseDecision {
                required: true,
                license_path: path.to_path_buf(),
            }),
        }
    }
}
