//! Clap argument definitions for the `sieve` CLI.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sieve")]
#[command(about = "Sieve - Inspect how search queries parse and compile")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that override the configured parser settings.
#[derive(Args, Debug, Clone, Default)]
pub struct ParserArgs {
    /// Soft length limit in characters, capped at 2048 [default: 300]
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Match keyword values exactly instead of case-folded
    #[arg(long)]
    pub strict: bool,

    /// Treat terms without a prefix as optional instead of required
    #[arg(long)]
    pub should: bool,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sieve parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Query to parse
    #[arg(allow_hyphen_values = true)]
    pub query: String,

    #[command(flatten)]
    /// Parser setting overrides.
    pub parser: ParserArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sieve filter`.
#[derive(Args, Debug, Clone)]
pub struct FilterCommand {
    /// Query to compile
    #[arg(allow_hyphen_values = true)]
    pub query: String,

    #[command(flatten)]
    /// Parser setting overrides.
    pub parser: ParserArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sieve keywords`.
#[derive(Args, Debug, Clone)]
pub struct KeywordsCommand {
    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Supported `sieve` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the syntax tree and warnings for a query
    #[command(after_help = "\
QUERY SYNTAX:
  term                  Term must appear
  \"phrase\"              Exact phrase match
  \"phrase\"~2            Phrase with proximity
  -term                 Term must NOT appear
  +term                 Term must appear (explicit)
  keyword:value         Keyword directive, e.g. incategory:Felines
  -keyword:value        Negated keyword directive

EXAMPLES:
  sieve parse 'cats incategory:Felines'
  sieve parse '\"big cats\"~2 -pageid:12'
  sieve parse --json 'filew:>800 sunset'")]
    Parse(ParseCommand),

    /// Show the backend query string and filter a query compiles to
    Filter(FilterCommand),

    /// List registered keyword features
    Keywords(KeywordsCommand),

    /// Show configuration files, effective settings and warnings
    Config,
}
