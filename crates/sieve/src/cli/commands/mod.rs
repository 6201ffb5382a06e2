//! Command implementations and dispatch.

pub mod config;
pub mod filter;
pub mod keywords;
pub mod parse;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &mut CommandContext) -> ExitCode {
    match command {
        Commands::Parse(cmd) => parse::run(ctx, &cmd),
        Commands::Filter(cmd) => filter::run(ctx, &cmd),
        Commands::Keywords(cmd) => keywords::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
    }
}
