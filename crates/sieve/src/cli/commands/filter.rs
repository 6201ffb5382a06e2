//! Implementation of `sieve filter`.

use std::process::ExitCode;

use serde::Serialize;
use sieve_fallback::FallbackRunner;
use sieve_query::{CompiledQuery, FilterCompiler, Warning};

use crate::cli::{
    args::FilterCommand,
    context::CommandContext,
    output::{print_indented, print_json, print_warnings, report_too_long},
};

/// JSON output for `sieve filter`.
#[derive(Serialize)]
struct JsonFilterOutput<'a> {
    /// The raw query.
    query: &'a str,
    /// Free-text clauses rendered as one backend query string.
    query_string: String,
    /// The compiled query.
    #[serde(flatten)]
    compiled: &'a CompiledQuery,
    /// Fallback methods that would run if the query came back weak.
    fallback_methods: Vec<&'static str>,
    /// Warnings collected while parsing.
    warnings: &'a [Warning],
}

/// Compiles a query and prints the backend query string and filter.
pub fn run(ctx: &mut CommandContext, cmd: &FilterCommand) -> ExitCode {
    let parser = match ctx.parser(&cmd.parser) {
        Ok(parser) => parser,
        Err(code) => return code,
    };

    let parsed = match parser.parse(&cmd.query) {
        Ok(parsed) => parsed,
        Err(e) => return report_too_long(&e),
    };

    let compiled = FilterCompiler::new(parser.registry(), parser.config()).compile(&parsed);
    let runner = FallbackRunner::from_profile(&parsed, &ctx.config.fallback_profile());

    if cmd.output.json {
        return print_json(&JsonFilterOutput {
            query: parsed.query(),
            query_string: compiled.query_string(),
            compiled: &compiled,
            fallback_methods: runner.method_names(),
            warnings: parsed.warnings(),
        });
    }

    println!("Query string:");
    println!("  {}", compiled.query_string());
    println!();

    println!("Text clauses:");
    if compiled.text_clauses.is_empty() {
        println!("  (none)");
    }
    for clause in &compiled.text_clauses {
        println!("  {} {}", clause.occur, clause.query);
    }
    println!();

    println!("Filter:");
    match serde_json::to_string_pretty(&compiled.filter) {
        Ok(json) => print_indented(&json),
        Err(e) => {
            eprintln!("error: failed to serialize filter: {e}");
            return ExitCode::FAILURE;
        }
    }
    println!();

    let possible = if compiled.results_possible { "yes" } else { "no" };
    println!("Results possible: {possible}");

    if runner.is_empty() {
        println!("Fallback methods: (none)");
    } else {
        println!("Fallback methods: {}", runner.method_names().join(", "));
    }

    print_warnings(parsed.warnings());
    ExitCode::SUCCESS
}
