use std::env;
use std::process::Command;

/// Run a command and return its trimmed stdout, if it succeeded.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let git_hash = command_output("git", &["rev-parse", "HEAD"])
        .unwrap_or_else(|| "unknown".to_string());

    // Cargo tells us which compiler it is driving.
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rustc_version =
        command_output(&rustc, &["--version"]).unwrap_or_else(|| "rustc (unknown)".to_string());

    println!("cargo:rustc-env=SEED_BUILD_DATE={}", build_date);
    println!("cargo:rustc-env=SEED_SCM_ID={}", git_hash);
    println!("cargo:rustc-env=SEED_RUSTC_VERSION={}", rustc_version);
}
