//! SEED installer - provisions a Unix host into a node of the SEED platform.
//!
//! The installer parses its command line against a versioned option schema,
//! checks that a license was supplied, writes the license public key into
//! its working directory and hands a [`StartupConfiguration`] to the
//! application runtime, which drives the installer's lifecycle hooks and
//! shows the host status panel.
//!
//! The three outside collaborators sit behind traits:
//!
//! - [`ArgumentParser`] - command line parsing (clap)
//! - [`ApplicationRuntime`] - lifecycle orchestration ([`CliApplication`])
//! - [`HostDescriptor`] - host introspection (sysinfo)
//!
//! [`StartupConfiguration`]: app::startup::StartupConfiguration
//! [`ArgumentParser`]: cli::parser::ArgumentParser
//! [`ApplicationRuntime`]: app::runtime::ApplicationRuntime
//! [`CliApplication`]: app::runtime::CliApplication
//! [`HostDescriptor`]: hardware::HostDescriptor

// Core modules
pub mod config;
pub mod constants;
pub mod errors;
pub mod hardware;
pub mod installer;
pub mod logging;
pub mod preflight;
pub mod version;

// Command line handling
pub mod cli {
    pub mod options;
    pub mod parser;
    pub mod translator;
}

// License gating and key provisioning
pub mod license {
    pub mod gate;
    pub mod provisioner;
}

// Application lifecycle
pub mod app {
    pub mod lifecycle;
    pub mod runtime;
    pub mod startup;
}

// Terminal user interface
pub mod ui {
    pub mod panel;
}
