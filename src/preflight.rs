//! Checks performed before the installer does any work.

use crate::errors::{InstallerError, InstallerResult};

/// Effective user id of the process.
#[cfg(unix)]
pub fn effective_uid() -> u32 {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() }
}

/// Fail unless the effective user is root.
#[cfg(unix)]
pub fn require_root() -> InstallerResult<()> {
    require_uid_zero(effective_uid())
}

/// Non-Unix hosts cannot become SEED nodes.
#[cfg(not(unix))]
pub fn require_root() -> InstallerResult<()> {
    Err(InstallerError::MissingDependency(
        "a Unix operating system is required".to_string(),
    ))
}

fn require_uid_zero(uid: u32) -> InstallerResult<()> {
    if uid == 0 {
        Ok(())
    } else {
        Err(InstallerError::PrivilegeRequired)
    }
}

/// Fail if host introspection is not available on this platform.
pub fn require_supported_platform() -> InstallerResult<()> {
    if sysinfo::IS_SUPPORTED_SYSTEM {
        Ok(())
    } else {
        Err(InstallerError::MissingDependency(
            "host introspection is not supported on this platform".to_string(),
        ))
    }
}

/// Run all preflight checks in order.
pub fn run() -> InstallerResult<()> {
    require_root()?;
    require_supported_platform()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_uid_zero_passes() {
        assert!(require_uid_zero(0).is_ok());
        assert!(matches!(
            require_uid_zero(1000),
            Err(InstallerError::PrivilegeRequired)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn require_root_matches_effective_uid() {
        assert_eq!(require_root().is_ok(), effective_uid() == 0);
    }

    #[cfg(any(target_os = "linux", target_os = "macos"))]
    #[test]
    fn common_platforms_are_supported() {
        assert!(require_supported_platform().is_ok());
    }
}
