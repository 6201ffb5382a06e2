//! sieve: search query inspection
//!
//! sieve parses user search queries the way a wiki search engine does: free text, quoted
//! phrases and `keyword:value` directives, each directive handled by a pluggable keyword
//! feature. The `sieve` binary shows how a query parses, what it compiles to, which
//! keywords are registered, and which configuration is in effect.

#![warn(missing_docs)]

pub mod cli;
