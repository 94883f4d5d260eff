//! Host introspection.
//!
//! [`HostDescriptor`] is the seam the installer uses to learn about the
//! machine it runs on. [`SystemHostDescriptor`] answers with sysinfo, falls
//! back to platform-specific probes for the CPU name and asks an HTTP
//! service for the public IP address.

use std::net::IpAddr;
use std::time::Duration;

use sysinfo::System;
use tracing::{debug, warn};

use crate::config::NetworkConfig;
use crate::errors::InstallerResult;
use crate::version;

#[cfg(target_os = "linux")]
#[path = "hardware/linux.rs"]
mod platform;

#[cfg(target_os = "macos")]
#[path = "hardware/macos.rs"]
mod platform;

#[cfg(target_os = "windows")]
#[path = "hardware/windows.rs"]
mod platform;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod platform {
    pub fn cpu_name() -> Option<String> {
        None
    }
}

/// Facts about the host, as shown in the status panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFacts {
    pub cpu_name: String,
    pub cpu_cores: usize,
    /// Total physical memory in bytes.
    pub memory_bytes: u64,
    pub public_ip: Option<String>,
    pub host_name: String,
    pub os_name: String,
    pub os_version: String,
    pub kernel_version: String,
    /// Toolchain the installer was built with.
    pub runtime_version: String,
}

impl HostFacts {
    /// Total memory in whole megabytes (`bytes / 1024 / 1024`, truncated).
    pub fn memory_mb(&self) -> u64 {
        self.memory_bytes / 1024 / 1024
    }
}

/// Provides facts about the current host.
pub trait HostDescriptor {
    fn current(&self) -> InstallerResult<HostFacts>;
}

/// Value used when sysinfo cannot tell.
const UNKNOWN: &str = "unknown";

/// The address in a lookup response, if the body is exactly one IP address.
pub fn parse_public_ip(body: &str) -> Option<String> {
    body.trim().parse::<IpAddr>().ok().map(|ip| ip.to_string())
}

/// sysinfo-backed [`HostDescriptor`].
#[derive(Debug, Clone)]
pub struct SystemHostDescriptor {
    network: NetworkConfig,
}

impl SystemHostDescriptor {
    pub fn new(network: NetworkConfig) -> Self {
        Self { network }
    }

    /// Ask the configured endpoint for the public address and return the raw body.
    pub fn lookup_public_ip(&self) -> InstallerResult<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.network.timeout_secs))
            .build()?;

        let body = client
            .get(&self.network.public_ip_endpoint)
            .send()?
            .error_for_status()?
            .text()?;

        Ok(body.trim().to_string())
    }

    fn public_ip(&self) -> Option<String> {
        if !self.network.lookup_public_ip {
            return None;
        }
        match self.lookup_public_ip() {
            Ok(body) => {
                let ip = parse_public_ip(&body);
                if ip.is_none() {
                    warn!(response = %body, "Public IP service did not return an address");
                }
                ip
            }
            Err(e) => {
                warn!(error = %e, "Could not determine public IP address");
                None
            }
        }
    }
}

impl HostDescriptor for SystemHostDescriptor {
    fn current(&self) -> InstallerResult<HostFacts> {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();

        let cpu_name = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .or_else(platform::cpu_name)
            .unwrap_or_else(|| UNKNOWN.to_string());

        let facts = HostFacts {
            cpu_name,
            cpu_cores: sys.cpus().len(),
            memory_bytes: sys.total_memory(),
            public_ip: self.public_ip(),
            host_name: System::host_name().unwrap_or_else(|| UNKNOWN.to_string()),
            os_name: System::name().unwrap_or_else(|| UNKNOWN.to_string()),
            os_version: System::os_version().unwrap_or_else(|| UNKNOWN.to_string()),
            kernel_version: System::kernel_version().unwrap_or_else(|| UNKNOWN.to_string()),
            runtime_version: version::RUNTIME_VERSION.to_string(),
        };

        debug!(?facts, "Host facts collected");
        Ok(facts)
    }
}
