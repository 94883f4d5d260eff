//! Version data of the installer.
//!
//! Major, minor and patch come from `Cargo.toml`; the SCM id, the build
//! date and the compiler version are captured by `build.rs`.

pub const MAJOR_VERSION: &str = env!("CARGO_PKG_VERSION_MAJOR");
pub const MINOR_VERSION: &str = env!("CARGO_PKG_VERSION_MINOR");
pub const PATCH_LEVEL: &str = env!("CARGO_PKG_VERSION_PATCH");
pub const BUILD: u32 = 26;
pub const RELEASE_LEVEL: &str = "development";
pub const RELEASE_CODENAME: &str = "Sulaco";
pub const SCM_ID: &str = env!("SEED_SCM_ID");
pub const BUILD_DATE: &str = env!("SEED_BUILD_DATE");

/// Version of the toolchain the installer was built with.
pub const RUNTIME_VERSION: &str = env!("SEED_RUSTC_VERSION");

/// `major.minor.patch`
pub fn version_string() -> String {
    format!("{}.{}.{}", MAJOR_VERSION, MINOR_VERSION, PATCH_LEVEL)
}

/// Full version line, e.g. `0.1.0 (build 26, development 'Sulaco', built 2026-10-16)`.
pub fn long_version() -> String {
    format!(
        "{} (build {}, {} '{}', built {})",
        version_string(),
        BUILD,
        RELEASE_LEVEL,
        RELEASE_CODENAME,
        BUILD_DATE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_matches_package() {
        assert_eq!(version_string(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn long_version_mentions_codename() {
        let v = long_version();
        assert!(v.contains("build 26"));
        assert!(v.contains("Sulaco"));
    }

    #[test]
    fn long_version_carries_build_date() {
        assert_eq!(BUILD_DATE.len(), "2026-10-16".len());
        assert!(long_version().ends_with(&format!("built {BUILD_DATE})")));
    }
}
