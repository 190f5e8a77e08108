//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Production code in the TUI and Conductor runs on the tokio
//! runtime and MUST NOT block it.
//!
//! Forbidden:
//! - `reqwest::blocking::*`
//! - `std::thread::sleep` (use `tokio::time::sleep`)

use architectural_enforcement::{production_lines_in, PRODUCTION_DIRS};

const FORBIDDEN: &[(&str, &str)] = &[
    ("reqwest::blocking", "Blocking HTTP client"),
    ("std::thread::sleep", "Blocking sleep"),
    ("thread::sleep(", "Blocking sleep"),
];

#[test]
fn test_no_blocking_io_in_production_code() {
    let mut violations = Vec::new();

    for dir in PRODUCTION_DIRS {
        for line in production_lines_in(dir) {
            for (pattern, label) in FORBIDDEN {
                if line.code.contains(pattern) {
                    violations.push(format!("{line} ({label})"));
                }
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\nBlocking calls found in production code:\n");
        for violation in &violations {
            eprintln!("  {violation}");
        }
        eprintln!("\nUse tokio::time::sleep and the async reqwest client instead.");

        panic!(
            "\nFound {} blocking call(s) in production code.",
            violations.len()
        );
    }
}
