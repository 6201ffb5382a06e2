//! Implementation of `sieve config`.

use std::process::ExitCode;

use sieve_config::{ConfigWarning, Discovery, WalkEnd};

use crate::cli::{context::CommandContext, output::print_indented};

/// Shows configuration files, effective settings, and validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let discovery = Discovery::from_dir(&ctx.cwd);
    if discovery.is_empty() {
        println!("No configuration files found; using defaults.");
    } else {
        println!("Config files (highest precedence first):");
        for path in &discovery.local {
            println!("  {}", path.display());
        }
        if let Some(global) = &discovery.global {
            println!("  {} (global)", global.display());
        }
    }
    if let WalkEnd::RootConfig(path) = &discovery.walk_end {
        println!("Search stopped at root config {}", path.display());
    }
    println!();

    let settings = match ctx.config.settings_to_toml() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("Effective settings:");
    print_indented(&settings);

    let warnings = ctx.config.validate();
    if warnings.is_empty() {
        return ExitCode::SUCCESS;
    }

    println!();
    println!("Warnings ({}):", warnings.len());
    for warning in &warnings {
        println!("  - {warning}");
    }
    print_hints(&warnings);

    ExitCode::SUCCESS
}

/// Prints hints for resolving the reported warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|warning| match warning {
            ConfigWarning::SoftLimitAboveHardCeiling { .. } => {
                "Queries are never allowed past the hard ceiling; lower max_query_length."
            }
            ConfigWarning::ExemptKeywordUnregistered { .. } => {
                "Exemptions only apply to registered keywords; check the spelling or the disabled list."
            }
            ConfigWarning::DisabledKeywordUnknown { .. } => {
                "Run 'sieve keywords' to list the keywords that can be disabled."
            }
        })
        .collect();

    hints.sort_unstable();
    hints.dedup();

    println!();
    println!("Hints:");
    for hint in hints {
        println!("  - {hint}");
    }
}
