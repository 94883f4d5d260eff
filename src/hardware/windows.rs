use std::process::Command;

/// Processor name from `wmic cpu get Name`.
pub fn cpu_name() -> Option<String> {
    let output = Command::new("wmic")
        .args(["cpu", "get", "Name"])
        .output()
        .ok()?;

    let result = String::from_utf8_lossy(&output.stdout);
    let name = result.lines().nth(1).unwrap_or("").trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
