//! Command line parsing behind the [`ArgumentParser`] seam.
//!
//! [`ClapArgumentParser`] turns an [`OptionSchema`] into a `clap::Command`
//! at runtime, so the schema tables stay the single source of truth for
//! the accepted flags.

use std::collections::BTreeMap;
use std::ffi::OsString;

use clap::{Arg, ArgAction, Command};

use crate::cli::options::{OptionKind, OptionSchema, CLI_DESCRIPTION, CLI_EPILOGUE};
use crate::errors::InstallerResult;
use crate::version;

/// A single parsed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    Text(String),
    Switch(bool),
}

/// Parsed command line, keyed by option destination (`log_directory`, ...).
///
/// Value options that were not given are absent; switches are always
/// present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    values: BTreeMap<String, ArgumentValue>,
}

impl ParsedArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful in tests.
    pub fn with(mut self, destination: &str, value: ArgumentValue) -> Self {
        self.values.insert(destination.to_string(), value);
        self
    }

    /// The text value of an option, if it was given.
    pub fn text(&self, destination: &str) -> Option<&str> {
        match self.values.get(destination) {
            Some(ArgumentValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The state of a switch; absent switches are off.
    pub fn switch(&self, destination: &str) -> bool {
        matches!(self.values.get(destination), Some(ArgumentValue::Switch(true)))
    }
}

/// Group descriptions followed by the fixed epilogue.
fn help_epilogue(schema: &OptionSchema) -> String {
    let mut lines: Vec<String> = schema
        .groups
        .iter()
        .map(|group| format!("{}: {}", group.name, group.description))
        .collect();
    if !CLI_EPILOGUE.is_empty() {
        lines.push(CLI_EPILOGUE.to_string());
    }
    lines.join("\n")
}

/// Parses an argument vector against an option schema.
pub trait ArgumentParser {
    /// `argv` includes the program name as its first element.
    fn parse(&self, schema: &OptionSchema, argv: Vec<OsString>) -> InstallerResult<ParsedArguments>;
}

/// clap-backed [`ArgumentParser`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClapArgumentParser;

impl ClapArgumentParser {
    /// Build the clap command for a schema.
    pub fn command(schema: &OptionSchema) -> Command {
        let mut command = Command::new("seed-installer")
            .about(CLI_DESCRIPTION)
            .override_usage(schema.usage)
            .version(version::version_string())
            .long_version(version::long_version());

        command = command.after_help(help_epilogue(schema));

        for group in schema.groups {
            command = command.next_help_heading(group.name);
            for option in group.options {
                let mut arg = Arg::new(option.destination())
                    .long(option.command)
                    .help(option.help);

                if let Some(short) = option.shortkey {
                    arg = arg.short(short);
                }

                arg = match option.kind {
                    OptionKind::Switch => arg.action(ArgAction::SetTrue),
                    OptionKind::Value => {
                        let arg = arg.action(ArgAction::Set).num_args(1);
                        match option.metavar {
                            Some(metavar) => arg.value_name(metavar),
                            None => arg,
                        }
                    }
                };

                command = command.arg(arg);
            }
        }

        command
    }
}

impl ArgumentParser for ClapArgumentParser {
    fn parse(&self, schema: &OptionSchema, argv: Vec<OsString>) -> InstallerResult<ParsedArguments> {
        let matches = Self::command(schema).try_get_matches_from(argv)?;

        let mut parsed = ParsedArguments::new();
        for option in schema.options() {
            let destination = option.destination();
            match option.kind {
                OptionKind::Switch => {
                    let on = matches.get_flag(&destination);
                    parsed = parsed.with(&destination, ArgumentValue::Switch(on));
                }
                OptionKind::Value => {
                    if let Some(value) = matches.get_one::<String>(&destination) {
                        parsed = parsed.with(&destination, ArgumentValue::Text(value.clone()));
                    }
                }
            }
        }

        Ok(parsed)
    }
}
