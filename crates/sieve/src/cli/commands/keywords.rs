//! Implementation of `sieve keywords`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;

use crate::cli::{
    args::KeywordsCommand,
    context::CommandContext,
    output::print_json,
};

/// JSON output for one registered feature.
#[derive(Serialize)]
struct JsonFeature<'a> {
    /// Feature name.
    name: &'static str,
    /// Keywords the feature answers to.
    keywords: &'a [&'static str],
    /// Who registered the feature.
    source: &'a str,
}

/// Lists the registered keyword features in registration order.
pub fn run(ctx: &mut CommandContext, cmd: &KeywordsCommand) -> ExitCode {
    let registry = match ctx.registry() {
        Ok(registry) => registry,
        Err(code) => return code,
    };

    if cmd.output.json {
        let features: Vec<JsonFeature<'_>> = registry
            .entries()
            .iter()
            .map(|entry| JsonFeature {
                name: entry.feature.name(),
                keywords: entry.feature.keywords(),
                source: &entry.source,
            })
            .collect();
        return print_json(&features);
    }

    if registry.is_empty() {
        println!("No keyword features registered.");
        return ExitCode::SUCCESS;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Feature", "Keywords", "Source"]);
    for entry in registry.entries() {
        table.add_row(vec![
            Cell::new(entry.feature.name()),
            Cell::new(entry.feature.keywords().join(", ")),
            Cell::new(&entry.source),
        ]);
    }
    println!("{table}");

    ExitCode::SUCCESS
}
