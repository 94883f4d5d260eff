//! Startup configuration handed to the application runtime.

use std::path::{Path, PathBuf};

use crate::errors::{InstallerError, InstallerResult};

/// License settings the runtime uses to locate and validate the license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseSettings {
    /// Whether the runtime must validate the license.
    pub required: bool,
    /// Public key used to decrypt the license file.
    pub key_path: PathBuf,
    pub license_path: PathBuf,
    /// Optional decryption key given on the command line (schema revision 1).
    pub decryption_key: Option<String>,
}

/// Immutable configuration describing how the runtime should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfiguration {
    working_directory: PathBuf,
    force_create_working_directory: bool,
    log_directory: PathBuf,
    force_create_log_directory: bool,
    debug_mode: bool,
    license: LicenseSettings,
    telemetry_endpoint: String,
}

impl StartupConfiguration {
    pub fn builder() -> StartupConfigurationBuilder {
        StartupConfigurationBuilder::default()
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn force_create_working_directory(&self) -> bool {
        self.force_create_working_directory
    }

    pub fn log_directory(&self) -> &Path {
        &self.log_directory
    }

    pub fn force_create_log_directory(&self) -> bool {
        self.force_create_log_directory
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn license(&self) -> &LicenseSettings {
        &self.license
    }

    pub fn license_required(&self) -> bool {
        self.license.required
    }

    pub fn telemetry_endpoint(&self) -> &str {
        &self.telemetry_endpoint
    }
}

/// Assembles a [`StartupConfiguration`].
///
/// `build` only checks that the mandatory parts were supplied; the values
/// themselves were validated upstream.
#[derive(Debug, Default)]
pub struct StartupConfigurationBuilder {
    working_directory: Option<(PathBuf, bool)>,
    log_directory: Option<(PathBuf, bool)>,
    debug_mode: bool,
    license: Option<LicenseSettings>,
    telemetry_endpoint: Option<String>,
}

impl StartupConfigurationBuilder {
    pub fn working_directory(mut self, path: impl Into<PathBuf>, force_create: bool) -> Self {
        self.working_directory = Some((path.into(), force_create));
        self
    }

    pub fn log_directory(mut self, path: impl Into<PathBuf>, force_create: bool) -> Self {
        self.log_directory = Some((path.into(), force_create));
        self
    }

    pub fn debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    pub fn license(mut self, license: LicenseSettings) -> Self {
        self.license = Some(license);
        self
    }

    pub fn telemetry_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.telemetry_endpoint = Some(endpoint.into());
        self
    }

    pub fn build(self) -> InstallerResult<StartupConfiguration> {
        let missing =
            |field: &str| InstallerError::ConfigError(format!("startup configuration is missing {field}"));

        let (working_directory, force_create_working_directory) =
            self.working_directory.ok_or_else(|| missing("the working directory"))?;
        let (log_directory, force_create_log_directory) =
            self.log_directory.ok_or_else(|| missing("the log directory"))?;

        Ok(StartupConfiguration {
            working_directory,
            force_create_working_directory,
            log_directory,
            force_create_log_directory,
            debug_mode: self.debug_mode,
            license: self.license.ok_or_else(|| missing("the license settings"))?,
            telemetry_endpoint: self
                .telemetry_endpoint
                .ok_or_else(|| missing("the telemetry endpoint"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn license() -> LicenseSettings {
        LicenseSettings {
            required: true,
            key_path: PathBuf::from("/opt/seed/installer/license.pem"),
            license_path: PathBuf::from("/tmp/my.lic"),
            decryption_key: None,
        }
    }

    #[test]
    fn builds_complete_configuration() {
        let config = StartupConfiguration::builder()
            .working_directory("/opt/seed/installer", true)
            .log_directory("/tmp/logs", true)
            .debug_mode(true)
            .license(license())
            .telemetry_endpoint("https://telemetry.example/1")
            .build()
            .unwrap();

        assert_eq!(config.working_directory(), Path::new("/opt/seed/installer"));
        assert!(config.force_create_working_directory());
        assert_eq!(config.log_directory(), Path::new("/tmp/logs"));
        assert!(config.debug_mode());
        assert!(config.license_required());
        assert_eq!(config.license().license_path, PathBuf::from("/tmp/my.lic"));
        assert_eq!(config.telemetry_endpoint(), "https://telemetry.example/1");
    }

    #[test]
    fn debug_defaults_to_off() {
        let config = StartupConfiguration::builder()
            .working_directory("/w", false)
            .log_directory("/l", false)
            .license(license())
            .telemetry_endpoint("t")
            .build()
            .unwrap();
        assert!(!config.debug_mode());
    }

    #[test]
    fn missing_license_settings_fail() {
        let err = StartupConfiguration::builder()
            .working_directory("/w", true)
            .log_directory("/l", true)
            .telemetry_endpoint("t")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("license settings"));
    }
}
