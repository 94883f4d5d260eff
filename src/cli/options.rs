//! Declarative command line option schema.
//!
//! The accepted flags are data, not code: a [`OptionSchema`] lists groups of
//! [`OptionSpec`]s and each option carries an [`ArgumentRole`] that tells the
//! translator what the value means. Adding, renaming or dropping a flag only
//! touches the schema tables below.
//!
//! Two revisions exist. Revision 1 configured a daemon-style installer with
//! separate configuration, data and decryption-key flags. Revision 2 (the
//! default) replaces those with a single `--license-key`.

use crate::errors::{InstallerError, InstallerResult};

/// Description shown at the top of `--help`.
pub const CLI_DESCRIPTION: &str = "SEED installer utility. It manages the transformation of a \
     regular Unix system to a SEED node.";

/// Epilogue shown at the bottom of `--help`.
pub const CLI_EPILOGUE: &str = "";

/// How an option consumes its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Boolean flag without a value.
    Switch,
    /// Flag followed by a single value.
    Value,
}

/// What the value of an option means to the installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArgumentRole {
    LogDirectory,
    DebugMode,
    LicensePath,
    ConfigDirectory,
    DataDirectory,
    DecryptionKey,
}

/// A single command line option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub kind: OptionKind,
    pub role: ArgumentRole,
    /// Short key without the dash, if any.
    pub shortkey: Option<char>,
    /// Long command without the dashes.
    pub command: &'static str,
    pub help: &'static str,
    pub metavar: Option<&'static str>,
}

impl OptionSpec {
    /// Key under which the parsed value is stored, e.g. `log_directory`.
    pub fn destination(&self) -> String {
        self.command.replace('-', "_")
    }
}

/// A named group of options.
///
/// The name becomes a help heading and the description is listed below the
/// options in `--help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionGroup {
    pub name: &'static str,
    pub description: &'static str,
    pub options: &'static [OptionSpec],
}

/// Option schema revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaRevision {
    V1,
    V2,
}

impl TryFrom<u8> for SchemaRevision {
    type Error = InstallerError;

    fn try_from(value: u8) -> InstallerResult<Self> {
        match value {
            1 => Ok(SchemaRevision::V1),
            2 => Ok(SchemaRevision::V2),
            other => Err(InstallerError::ConfigError(format!(
                "cli.schema_revision must be 1 or 2, got '{other}'"
            ))),
        }
    }
}

/// A complete, versioned set of accepted options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSchema {
    pub revision: SchemaRevision,
    pub usage: &'static str,
    pub groups: &'static [OptionGroup],
}

impl OptionSchema {
    /// The schema for the given revision.
    pub fn for_revision(revision: SchemaRevision) -> &'static OptionSchema {
        match revision {
            SchemaRevision::V1 => &SCHEMA_V1,
            SchemaRevision::V2 => &SCHEMA_V2,
        }
    }

    /// Iterate over every option in every group.
    pub fn options(&self) -> impl Iterator<Item = &'static OptionSpec> + '_ {
        self.groups.iter().flat_map(|g| g.options.iter())
    }

    /// The option bound to `role`, if this revision has one.
    pub fn option_for(&self, role: ArgumentRole) -> Option<&'static OptionSpec> {
        self.options().find(|o| o.role == role)
    }
}

const LOG_DIRECTORY: OptionSpec = OptionSpec {
    kind: OptionKind::Value,
    role: ArgumentRole::LogDirectory,
    shortkey: Some('l'),
    command: "log-directory",
    help: "Sets a custom log directory.",
    metavar: Some("PATH"),
};

const DEBUG: OptionSpec = OptionSpec {
    kind: OptionKind::Switch,
    role: ArgumentRole::DebugMode,
    shortkey: Some('d'),
    command: "debug",
    help: "Starts the installer in debug mode.",
    metavar: None,
};

const MISC_GROUP: OptionGroup = OptionGroup {
    name: "Miscellaneous Options",
    description: "Contains miscellaneous options for the SEED installer utility.",
    options: &[DEBUG],
};

/// Revision 1: configuration, data and log directories plus a decryption key.
pub static SCHEMA_V1: OptionSchema = OptionSchema {
    revision: SchemaRevision::V1,
    usage: "seed-installer [-h|--help] [-d|--debug] [-c|--config-directory PATH] \
            [--data-directory PATH] [-l|--log-directory PATH] [--key KEY]",
    groups: &[
        OptionGroup {
            name: "Configuration",
            description: "Contains options to customize the configuration of the SEED installer.",
            options: &[
                OptionSpec {
                    kind: OptionKind::Value,
                    role: ArgumentRole::ConfigDirectory,
                    shortkey: Some('c'),
                    command: "config-directory",
                    help: "Sets a custom configuration directory.",
                    metavar: Some("PATH"),
                },
                OptionSpec {
                    kind: OptionKind::Value,
                    role: ArgumentRole::DataDirectory,
                    shortkey: None,
                    command: "data-directory",
                    help: "Sets a custom data directory.",
                    metavar: Some("PATH"),
                },
                LOG_DIRECTORY,
                OptionSpec {
                    kind: OptionKind::Value,
                    role: ArgumentRole::DecryptionKey,
                    shortkey: None,
                    command: "key",
                    help: "Decryption key to use when loading \
                           the configuration.",
                    metavar: Some("KEY"),
                },
            ],
        },
        MISC_GROUP,
    ],
};

/// Revision 2: log directory and license file.
pub static SCHEMA_V2: OptionSchema = OptionSchema {
    revision: SchemaRevision::V2,
    usage: "seed-installer [-h|--help] [-d|--debug] [-l|--log-directory PATH] \
            [-k|--license-key KEY]",
    groups: &[
        OptionGroup {
            name: "Configuration",
            description: "Contains options to customize the configuration of the SEED installer.",
            options: &[
                LOG_DIRECTORY,
                OptionSpec {
                    kind: OptionKind::Value,
                    role: ArgumentRole::LicensePath,
                    shortkey: Some('k'),
                    command: "license-key",
                    help: "Path to the license file of the SEED node.",
                    metavar: Some("KEY"),
                },
            ],
        },
        MISC_GROUP,
    ],
};
