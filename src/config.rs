//! Configuration system for the SEED installer.
//!
//! Configuration is loaded from multiple sources with the following precedence:
//! 1. Environment variables (highest priority)
//! 2. `installer.toml` in the configuration directory
//! 3. Default values (lowest priority)
//!
//! The configuration directory is `/etc/seed/` unless overridden by
//! `SEED_CONFIG_DIRECTORY` or, with the revision 1 option schema, by
//! `--config-directory`.
//!
//! # Environment Variables
//!
//! - `SEED_CONFIG_DIRECTORY` - Directory containing `installer.toml`
//! - `SEED_WORKING_DIRECTORY` - Working directory of the installer
//! - `SEED_LOG_DIRECTORY` - Default log directory
//! - `SEED_LICENSE_POLICY` - `strict` or `permissive`
//! - `SEED_SCHEMA_REVISION` - Command line schema revision (1 or 2)
//! - `SEED_TELEMETRY_ENDPOINT` - Error reporting endpoint
//! - `SEED_PUBLIC_IP_LOOKUP` - Query the public IP address (true/false)
//! - `SEED_STATUS_PANEL` - Show the terminal status panel (true/false)
//! - `SEED_LOG_LEVEL` - Log level (trace, debug, info, warn, error)

use config::Config;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::cli::options::{ArgumentRole, OptionSchema, SchemaRevision};
use crate::constants::{
    CONFIG_FILE_STEM, DEFAULT_CONFIG_DIRECTORY, DEFAULT_LOG_DIRECTORY,
    DEFAULT_NETWORK_TIMEOUT_SECS, DEFAULT_PUBLIC_IP_ENDPOINT, DEFAULT_WORKING_DIRECTORY,
    SEED_TELEMETRY_ENDPOINT,
};
use crate::errors::{InstallerError, InstallerResult};
use crate::license::gate::LicensePolicy;

/// Environment variable naming the configuration directory.
pub const CONFIG_DIRECTORY_ENV: &str = "SEED_CONFIG_DIRECTORY";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Filesystem locations
    pub paths: PathsConfig,
    /// License enforcement
    pub license: LicenseConfig,
    /// Command line schema selection
    pub cli: CliConfig,
    /// Error reporting
    pub telemetry: TelemetryConfig,
    /// Public IP lookup
    pub network: NetworkConfig,
    /// Terminal status panel
    pub ui: UiConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory where the license key is written
    pub working_directory: String,
    /// Log directory used when `--log-directory` is absent
    pub log_directory: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            working_directory: DEFAULT_WORKING_DIRECTORY.to_string(),
            log_directory: DEFAULT_LOG_DIRECTORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LicenseConfig {
    /// License policy: "strict" or "permissive"
    pub policy: String,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            policy: "strict".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Option schema revision: 1 or 2
    pub schema_revision: u8,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self { schema_revision: 2 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Endpoint passed to the runtime for error reporting
    pub endpoint: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: SEED_TELEMETRY_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Query an external service for the public IP address
    pub lookup_public_ip: bool,
    /// URL returning the caller's address as plain text
    pub public_ip_endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            lookup_public_ip: true,
            public_ip_endpoint: DEFAULT_PUBLIC_IP_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_NETWORK_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Show the full-screen status panel in the main loop
    pub status_panel: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { status_panel: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn config_err(e: config::ConfigError) -> InstallerError {
    InstallerError::ConfigError(e.to_string())
}

fn env_bool(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|v| v.parse::<bool>().ok())
}

fn env_int(name: &str) -> Option<i64> {
    env::var(name).ok().and_then(|v| v.parse::<i64>().ok())
}

impl InstallerConfig {
    /// Directory searched for `installer.toml` when none is given explicitly.
    pub fn default_config_directory() -> PathBuf {
        env::var(CONFIG_DIRECTORY_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIRECTORY))
    }

    /// Load and validate the configuration.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. `<config_directory>/installer.toml` (optional)
    /// 3. Environment variables
    pub fn load(config_directory: Option<&Path>) -> InstallerResult<Self> {
        let directory = config_directory
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_directory);
        let file = directory.join(CONFIG_FILE_STEM);

        let builder = Config::builder()
            // Start with defaults
            .set_default("paths.working_directory", DEFAULT_WORKING_DIRECTORY)
            .map_err(config_err)?
            .set_default("paths.log_directory", DEFAULT_LOG_DIRECTORY)
            .map_err(config_err)?
            .set_default("license.policy", "strict")
            .map_err(config_err)?
            .set_default("cli.schema_revision", 2)
            .map_err(config_err)?
            .set_default("telemetry.endpoint", SEED_TELEMETRY_ENDPOINT)
            .map_err(config_err)?
            .set_default("network.lookup_public_ip", true)
            .map_err(config_err)?
            .set_default("network.public_ip_endpoint", DEFAULT_PUBLIC_IP_ENDPOINT)
            .map_err(config_err)?
            .set_default("network.timeout_secs", DEFAULT_NETWORK_TIMEOUT_SECS)
            .map_err(config_err)?
            .set_default("ui.status_panel", true)
            .map_err(config_err)?
            .set_default("logging.level", "info")
            .map_err(config_err)?
            // Load from installer.toml (optional)
            .add_source(config::File::from(file).required(false))
            // Override with environment variables
            .set_override_option(
                "paths.working_directory",
                env::var("SEED_WORKING_DIRECTORY").ok(),
            )
            .map_err(config_err)?
            .set_override_option("paths.log_directory", env::var("SEED_LOG_DIRECTORY").ok())
            .map_err(config_err)?
            .set_override_option("license.policy", env::var("SEED_LICENSE_POLICY").ok())
            .map_err(config_err)?
            .set_override_option("cli.schema_revision", env_int("SEED_SCHEMA_REVISION"))
            .map_err(config_err)?
            .set_override_option(
                "telemetry.endpoint",
                env::var("SEED_TELEMETRY_ENDPOINT").ok(),
            )
            .map_err(config_err)?
            .set_override_option("network.lookup_public_ip", env_bool("SEED_PUBLIC_IP_LOOKUP"))
            .map_err(config_err)?
            .set_override_option("ui.status_panel", env_bool("SEED_STATUS_PANEL"))
            .map_err(config_err)?
            .set_override_option("logging.level", env::var("SEED_LOG_LEVEL").ok())
            .map_err(config_err)?;

        let settings = builder
            .build()
            .map_err(|e| InstallerError::ConfigError(format!("failed to build config: {e}")))?;

        let config: Self = settings.try_deserialize().map_err(|e| {
            InstallerError::ConfigError(format!("failed to deserialize config: {e}"))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> InstallerResult<()> {
        if self.paths.working_directory.trim().is_empty() {
            return Err(InstallerError::ConfigError(
                "paths.working_directory cannot be empty".to_string(),
            ));
        }
        if self.paths.log_directory.trim().is_empty() {
            return Err(InstallerError::ConfigError(
                "paths.log_directory cannot be empty".to_string(),
            ));
        }

        let policy = self.license_policy()?;
        let revision = self.schema_revision()?;

        // Without a license flag a strict run could never pass the gate.
        let schema = OptionSchema::for_revision(revision);
        if policy == LicensePolicy::Strict && schema.option_for(ArgumentRole::LicensePath).is_none() {
            return Err(InstallerError::ConfigError(format!(
                "cli.schema_revision {} has no license option; set license.policy = \"permissive\" \
                 or use schema revision 2",
                self.cli.schema_revision
            )));
        }

        if self.network.lookup_public_ip && self.network.timeout_secs == 0 {
            return Err(InstallerError::ConfigError(
                "network.timeout_secs must be greater than 0".to_string(),
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(InstallerError::ConfigError(format!(
                    "logging.level must be one of: trace, debug, info, warn, error. Got '{other}'"
                )));
            }
        }

        Ok(())
    }

    /// The configured license policy.
    pub fn license_policy(&self) -> InstallerResult<LicensePolicy> {
        self.license.policy.parse()
    }

    /// The configured option schema revision.
    pub fn schema_revision(&self) -> InstallerResult<SchemaRevision> {
        SchemaRevision::try_from(self.cli.schema_revision)
    }
}
