use std::fs;
use std::process::Command;

/// Extract the value of the first `Model name` / `model name` line.
pub fn parse_model_name(text: &str) -> Option<String> {
    text.lines()
        .find(|line| line.trim_start().to_lowercase().starts_with("model name"))
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// CPU name from `/proc/cpuinfo`, falling back to `lscpu`.
pub fn cpu_name() -> Option<String> {
    if let Some(name) = fs::read_to_string("/proc/cpuinfo")
        .ok()
        .and_then(|text| parse_model_name(&text))
    {
        return Some(name);
    }

    let output = Command::new("lscpu").output().ok()?;
    parse_model_name(&String::from_utf8_lossy(&output.stdout))
}
