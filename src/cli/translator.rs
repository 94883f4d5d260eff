//! Maps parsed command line values onto paths and flags.
//!
//! Values are looked up by [`ArgumentRole`] through the schema, so the
//! translator does not care which revision produced them.

use std::path::{Component, Path, PathBuf};

use crate::cli::options::{ArgumentRole, OptionSchema};
use crate::cli::parser::ParsedArguments;
use crate::errors::InstallerResult;

/// Result of translating the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedArguments {
    pub log_directory: PathBuf,
    pub debug_mode: bool,
    pub license_path: Option<PathBuf>,
    /// Revision 1 only: directory containing `installer.toml`.
    pub config_directory: Option<PathBuf>,
    /// Revision 1 only: overrides the working directory.
    pub data_directory: Option<PathBuf>,
    /// Revision 1 only: key used to decrypt the license.
    pub decryption_key: Option<String>,
}

/// Expand a leading `~` and make the path absolute and lexically normal.
///
/// `.` and `..` components are resolved without touching the filesystem,
/// so the path does not have to exist.
pub fn absolute_path(raw: &str) -> InstallerResult<PathBuf> {
    let expanded = expand_user(raw);
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()?.join(expanded)
    };
    Ok(normalize(&joined))
}

fn expand_user(raw: &str) -> PathBuf {
    let rest = if raw == "~" {
        Some("")
    } else {
        raw.strip_prefix("~/")
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn text_for<'a>(
    parsed: &'a ParsedArguments,
    schema: &OptionSchema,
    role: ArgumentRole,
) -> Option<&'a str> {
    schema
        .option_for(role)
        .and_then(|option| parsed.text(&option.destination()))
        .filter(|value| !value.trim().is_empty())
}

fn path_for(
    parsed: &ParsedArguments,
    schema: &OptionSchema,
    role: ArgumentRole,
) -> InstallerResult<Option<PathBuf>> {
    text_for(parsed, schema, role).map(absolute_path).transpose()
}

/// Translate parsed arguments, falling back to `default_log_directory`.
///
/// An explicitly given log directory is made absolute; the default is used
/// exactly as configured.
pub fn translate(
    parsed: &ParsedArguments,
    schema: &OptionSchema,
    default_log_directory: &Path,
) -> InstallerResult<TranslatedArguments> {
    let log_directory = path_for(parsed, schema, ArgumentRole::LogDirectory)?
        .unwrap_or_else(|| default_log_directory.to_path_buf());

    let debug_mode = schema
        .option_for(ArgumentRole::DebugMode)
        .map(|option| parsed.switch(&option.destination()))
        .unwrap_or(false);

    Ok(TranslatedArguments {
        log_directory,
        debug_mode,
        license_path: path_for(parsed, schema, ArgumentRole::LicensePath)?,
        config_directory: path_for(parsed, schema, ArgumentRole::ConfigDirectory)?,
        data_directory: path_for(parsed, schema, ArgumentRole::DataDirectory)?,
        decryption_key: text_for(parsed, schema, ArgumentRole::DecryptionKey)
            .map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::options::{SCHEMA_V1, SCHEMA_V2};
    use crate::cli::parser::ArgumentValue;

    const DEFAULT_LOGS: &str = "/var/logs/seed/";

    #[test]
    fn absent_flags_use_defaults() {
        let parsed = ParsedArguments::new().with("debug", ArgumentValue::Switch(false));
        let t = translate(&parsed, &SCHEMA_V2, Path::new(DEFAULT_LOGS)).unwrap();

        assert_eq!(t.log_directory, PathBuf::from(DEFAULT_LOGS));
        assert!(!t.debug_mode);
        assert!(t.license_path.is_none());
        assert!(t.config_directory.is_none());
    }

    #[test]
    fn absolute_values_are_kept() {
        let parsed = ParsedArguments::new()
            .with("log_directory", ArgumentValue::Text("/tmp/logs".into()))
            .with("license_key", ArgumentValue::Text("/tmp/my.lic".into()))
            .with("debug", ArgumentValue::Switch(true));
        let t = translate(&parsed, &SCHEMA_V2, Path::new(DEFAULT_LOGS)).unwrap();

        assert_eq!(t.log_directory, PathBuf::from("/tmp/logs"));
        assert_eq!(t.license_path, Some(PathBuf::from("/tmp/my.lic")));
        assert!(t.debug_mode);
    }

    #[test]
    fn relative_values_become_absolute() {
        let parsed =
            ParsedArguments::new().with("log_directory", ArgumentValue::Text("logs/./x/..".into()));
        let t = translate(&parsed, &SCHEMA_V2, Path::new(DEFAULT_LOGS)).unwrap();

        let expected = std::env::current_dir().unwrap().join("logs");
        assert_eq!(t.log_directory, expected);
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(absolute_path("~/seed.lic").unwrap(), normalize(&home.join("seed.lic")));
        assert_eq!(absolute_path("~").unwrap(), normalize(&home));
    }

    #[test]
    fn tilde_inside_path_is_literal() {
        assert_eq!(absolute_path("/a/~b").unwrap(), PathBuf::from("/a/~b"));
    }

    #[test]
    fn empty_license_value_counts_as_absent() {
        let parsed = ParsedArguments::new().with("license_key", ArgumentValue::Text("  ".into()));
        let t = translate(&parsed, &SCHEMA_V2, Path::new(DEFAULT_LOGS)).unwrap();
        assert!(t.license_path.is_none());
    }

    #[test]
    fn revision_one_roles() {
        let parsed = ParsedArguments::new()
            .with("config_directory", ArgumentValue::Text("/etc/seed".into()))
            .with("data_directory", ArgumentValue::Text("/srv/seed/../data".into()))
            .with("key", ArgumentValue::Text("secret".into()))
            // Not part of revision 1, must be ignored.
            .with("license_key", ArgumentValue::Text("/tmp/x.lic".into()));
        let t = translate(&parsed, &SCHEMA_V1, Path::new(DEFAULT_LOGS)).unwrap();

        assert_eq!(t.config_directory, Some(PathBuf::from("/etc/seed")));
        assert_eq!(t.data_directory, Some(PathBuf::from("/srv/data")));
        assert_eq!(t.decryption_key.as_deref(), Some("secret"));
        assert!(t.license_path.is_none());
    }
}
