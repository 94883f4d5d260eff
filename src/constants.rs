//! Compiled-in defaults of the SEED installer.

/// Product name shown in the status panel and the log.
pub const PRODUCT_NAME: &str = "SEED Installer";

/// Directory where the installer keeps its working files.
pub const DEFAULT_WORKING_DIRECTORY: &str = "/opt/seed/installer/";

/// Directory where the installer writes its log files.
pub const DEFAULT_LOG_DIRECTORY: &str = "/var/logs/seed/";

/// Directory searched for `installer.toml`.
pub const DEFAULT_CONFIG_DIRECTORY: &str = "/etc/seed/";

/// Name of the configuration file (without extension) inside the config directory.
pub const CONFIG_FILE_STEM: &str = "installer";

/// File name of the license public key inside the working directory.
pub const LICENSE_KEY_FILE: &str = "license.pem";

/// File name substituted for the license path when no license is required.
pub const PLACEHOLDER_LICENSE_FILE: &str = "license.placeholder";

/// Error reporting endpoint handed to the application runtime.
pub const SEED_TELEMETRY_ENDPOINT: &str =
    "https://4c1e2d8f9a6b4e0f8d3a7b5c6e1f2a3b@telemetry.seed-platform.net/3";

/// Service queried for the host's public IP address.
pub const DEFAULT_PUBLIC_IP_ENDPOINT: &str = "https://api.ipify.org";

/// Timeout for the public IP lookup, in seconds.
pub const DEFAULT_NETWORK_TIMEOUT_SECS: u64 = 5;

/// RSA public key used by the licensing runtime to decrypt license files.
pub const SEED_LICENSE_PUBLIC_KEY: &str = "-----BEGIN PUBLIC KEY-----
MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAuRG0BlK9AvB3Nf+/0k3l
3VtUX/5ceR3oLlsdcxhUERx4VJLwm7iTJl9wFJ4s/weRXGbSs44ScNsDM+Sz0QXc
yGZ7osqIS7ts1/S5IlePQqrYNrSe+VhPxm4ubm5XvQd/9pp110wy/fMl3kPQmsPV
cN9/vHIaMgNGDI1iZmgoUTpx1AVmHsZoVmiB6EDLR+LjBhl0RBv5VN/0b1Pb2cVl
HyCuLyCZt2TaxYXKf/CpIWb7sCAcRKyOShKC+XBhOMapkhvGpt8bDdUM+54Zswtz
4RL3ng8U+3S+4rpiL5/Br2QzstWqpsmdBl2llXRrUB4zlMqqOoR0oJvaOc7E1ziT
2QIDAQAB
-----END PUBLIC KEY-----
";
