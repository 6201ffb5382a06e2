//! Query parsing and keyword features for sieve.
//!
//! Turns a user-typed search string into a typed tree of clauses and compiles it for a search
//! backend:
//!
//! - **Words**: `rust` - terms, with `\ ` joining words into one term
//! - **Phrases**: `"error handling"` - exact sequences, optionally `~N` or `~`
//! - **Prefixes**: `+rust -java` - required and excluded clauses
//! - **Keywords**: `incategory:Cats`, `pageid:1|2`, `filew:>100` - directives handled by
//!   pluggable [`KeywordFeature`]s
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use sieve_query::{FilterCompiler, KeywordRegistry, ParserConfig, QueryStringParser};
//!
//! let registry = Arc::new(KeywordRegistry::builtin());
//! let parser = QueryStringParser::new(Arc::clone(&registry), ParserConfig::default());
//!
//! let query = parser.parse("cats incategory:Felines -pageid:12").unwrap();
//! assert_eq!(query.clauses().len(), 3);
//!
//! let compiled = FilterCompiler::new(&registry, parser.config()).compile(&query);
//! assert_eq!(compiled.query_string(), "+cats");
//! assert!(compiled.results_possible);
//! ```

#![warn(missing_docs)]

mod ast;
mod compile;
mod error;
mod escape;
mod filter;
pub mod keyword;
mod lexer;
mod parser;
mod registry;
mod warning;

pub use ast::{
    BooleanClause, BooleanGroup, EmptyQueryNode, KeywordFeatureNode, Occur, ParsedQuery,
    PhraseNode, QueryNode, WordNode,
};
pub use compile::{CompiledQuery, FilterCompiler, TextClause};
pub use error::{QueryTooLong, RegistryError};
pub use escape::{escape_for_backend, escape_phrase};
pub use filter::{FilterContext, FilterExpression};
pub use keyword::{KeywordFeature, KeywordLimits, KeywordValue, ParsedValue};
pub use lexer::{HARD_QUERY_LENGTH_LIMIT, KeywordCandidate, Prefix, Token, TokenKind, tokenize};
pub use parser::{
    DEFAULT_EXEMPT_KEYWORDS, DEFAULT_MAX_QUERY_LENGTH, ParserConfig, QueryStringParser,
};
pub use registry::{BUILTIN_SOURCE, KeywordRegistry, KeywordRegistryBuilder, RegisteredFeature};
pub use warning::{Warning, WarningCollector, WarningList, keys};
