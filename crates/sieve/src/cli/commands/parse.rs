//! Implementation of `sieve parse`.

use std::process::ExitCode;

use crate::cli::{
    args::ParseCommand,
    context::CommandContext,
    output::{print_json, print_warnings, report_too_long},
};

/// Parses a query and prints its syntax tree and warnings.
pub fn run(ctx: &mut CommandContext, cmd: &ParseCommand) -> ExitCode {
    let parser = match ctx.parser(&cmd.parser) {
        Ok(parser) => parser,
        Err(code) => return code,
    };

    let parsed = match parser.parse(&cmd.query) {
        Ok(parsed) => parsed,
        Err(e) => return report_too_long(&e),
    };

    if cmd.output.json {
        return print_json(&parsed);
    }

    print!("{}", parsed.root());
    print_warnings(parsed.warnings());
    ExitCode::SUCCESS
}
