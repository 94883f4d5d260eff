//! Writes the license public key into the working directory.
//!
//! The licensing runtime looks for the RSA public key at
//! `<working_directory>/license.pem`. The key is compiled into the installer
//! and rewritten on every run, replacing whatever was there before.

use std::fs;
use std::path::{Path, PathBuf};

use ring::digest::{digest, SHA256};
use tracing::{debug, info};

use crate::constants::{LICENSE_KEY_FILE, SEED_LICENSE_PUBLIC_KEY};
use crate::errors::InstallerResult;

/// Where the key lives for a given working directory.
pub fn license_key_path(working_directory: &Path) -> PathBuf {
    working_directory.join(LICENSE_KEY_FILE)
}

/// Hex-encoded SHA-256 of the embedded public key.
pub fn key_fingerprint() -> String {
    hex::encode(digest(&SHA256, SEED_LICENSE_PUBLIC_KEY.as_bytes()))
}

/// Write the embedded public key to `<working_directory>/license.pem`.
///
/// With `force_create` the working directory is created first. Filesystem
/// errors are returned as-is; nothing is retried.
pub fn provision_key(working_directory: &Path, force_create: bool) -> InstallerResult<PathBuf> {
    if force_create {
        fs::create_dir_all(working_directory)?;
        debug!(directory = %working_directory.display(), "Working directory ready");
    }

    let path = license_key_path(working_directory);
    fs::write(&path, SEED_LICENSE_PUBLIC_KEY)?;

    info!(
        path = %path.display(),
        sha256 = %key_fingerprint(),
        "License public key written"
    );

    Ok(path)
}
