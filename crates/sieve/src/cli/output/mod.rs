//! Shared rendering helpers for CLI output.

use std::process::ExitCode;

use serde::Serialize;
use sieve_query::{QueryTooLong, Warning};

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints parse warnings under a heading, or nothing when there are none.
pub fn print_warnings(warnings: &[Warning]) {
    if warnings.is_empty() {
        return;
    }
    println!("Warnings ({}):", warnings.len());
    for warning in warnings {
        println!("  - {warning}");
    }
}

/// Reports a rejected query on stderr.
pub fn report_too_long(error: &QueryTooLong) -> ExitCode {
    eprintln!("error: {error}");
    eprintln!("  {}", error.to_warning());
    ExitCode::FAILURE
}

/// Prints each line of `text` indented by two spaces.
pub fn print_indented(text: &str) {
    for line in text.lines() {
        println!("  {line}");
    }
}
