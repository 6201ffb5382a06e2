//! Filter compiler.
//!
//! Walks a parsed query and splits it into free-text clauses, escaped for the backend
//! query-string syntax, and a filter built by the keyword features.

use serde::Serialize;
use tracing::debug;

use crate::{
    ast::{BooleanClause, KeywordFeatureNode, Occur, ParsedQuery, QueryNode},
    escape::{escape_for_backend, escape_phrase},
    filter::{FilterContext, FilterExpression},
    parser::ParserConfig,
    registry::KeywordRegistry,
};

/// One free-text clause of a compiled query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextClause {
    /// How the clause participates in matching.
    pub occur: Occur,
    /// Escaped backend query-string text.
    pub query: String,
}

/// A query ready for the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    /// Free-text clauses in source order.
    pub text_clauses: Vec<TextClause>,
    /// Filter from keyword directives. [`FilterExpression::MatchAll`] when there are none.
    pub filter: FilterExpression,
    /// False when some directive can match nothing, which makes the whole query empty.
    pub results_possible: bool,
}

impl CompiledQuery {
    /// Renders the free-text clauses as one backend query string.
    pub fn query_string(&self) -> String {
        let parts: Vec<String> = self
            .text_clauses
            .iter()
            .map(|clause| format!("{}{}", clause.occur.prefix(), clause.query))
            .collect();
        parts.join(" ")
    }
}

/// Compiles parsed queries against the registry they were parsed with.
#[derive(Debug, Clone, Copy)]
pub struct FilterCompiler<'a> {
    /// Features that build filters for keyword nodes.
    registry: &'a KeywordRegistry,
    /// Settings handed to the features.
    context: FilterContext,
    /// Whether terms may start with a wildcard.
    allow_leading_wildcard: bool,
}

/// Accumulates the output of a compilation.
#[derive(Debug, Default)]
struct Compiled {
    /// Free-text clauses.
    text: Vec<TextClause>,
    /// Filters that must match.
    must: Vec<FilterExpression>,
    /// Filters that must not match.
    must_not: Vec<FilterExpression>,
    /// Set when a directive can match nothing.
    unsatisfiable: bool,
}

/// Combines the occurrence of an enclosing clause with that of a nested one.
fn combine(outer: Occur, inner: Occur) -> Occur {
    match (outer, inner) {
        (Occur::MustNot, Occur::MustNot) => Occur::Must,
        (Occur::MustNot, _) | (_, Occur::MustNot) => Occur::MustNot,
        (Occur::Should, _) | (_, Occur::Should) => Occur::Should,
        (Occur::Must, Occur::Must) => Occur::Must,
    }
}

impl<'a> FilterCompiler<'a> {
    /// Creates a compiler using the filter and escaping settings of `config`.
    pub fn new(registry: &'a KeywordRegistry, config: &ParserConfig) -> Self {
        Self {
            registry,
            context: FilterContext {
                strict_matching: config.strict_matching,
            },
            allow_leading_wildcard: config.allow_leading_wildcard,
        }
    }

    /// Compiles a parsed query.
    ///
    /// A blank query compiles to no text and a match-all filter.
    pub fn compile(&self, query: &ParsedQuery) -> CompiledQuery {
        let mut out = Compiled::default();
        for clause in query.clauses() {
            self.compile_clause(clause, Occur::Must, &mut out);
        }

        let filter = if out.unsatisfiable {
            FilterExpression::MatchNone
        } else if out.must_not.is_empty() {
            FilterExpression::all_of(out.must)
        } else {
            FilterExpression::Bool {
                must: out.must,
                should: Vec::new(),
                must_not: out.must_not,
            }
        };

        CompiledQuery {
            text_clauses: out.text,
            filter,
            results_possible: !out.unsatisfiable,
        }
    }

    /// Compiles one clause under the occurrence of its parent.
    fn compile_clause(&self, clause: &BooleanClause, outer: Occur, out: &mut Compiled) {
        let occur = combine(outer, clause.occur);
        self.compile_node(&clause.node, occur, out);
    }

    /// Compiles one node with its effective occurrence.
    fn compile_node(&self, node: &QueryNode, occur: Occur, out: &mut Compiled) {
        match node {
            QueryNode::Word(word) => {
                if !word.text.is_empty() {
                    out.text.push(TextClause {
                        occur,
                        query: escape_for_backend(&word.text, self.allow_leading_wildcard),
                    });
                }
            }
            QueryNode::Phrase(phrase) => {
                if !phrase.phrase.is_empty() {
                    let text = escape_phrase(&phrase.phrase);
                    let query = match phrase.slop {
                        Some(slop) => format!("\"{text}\"~{slop}"),
                        None => format!("\"{text}\""),
                    };
                    out.text.push(TextClause { occur, query });
                }
            }
            QueryNode::Keyword(keyword) => self.compile_keyword(keyword, occur, out),
            QueryNode::Clause(clause) => self.compile_clause(clause, occur, out),
            QueryNode::Group(group) => {
                for clause in &group.clauses {
                    self.compile_clause(clause, occur, out);
                }
            }
            QueryNode::Empty(_) => {}
        }
    }

    /// Builds the filter of a keyword directive.
    fn compile_keyword(&self, node: &KeywordFeatureNode, occur: Occur, out: &mut Compiled) {
        let Some(feature) = self.registry.find(&node.key) else {
            debug!(key = %node.key, "no feature for keyword, skipped");
            return;
        };

        match feature.build_filter(&node.parsed_value, &self.context) {
            Some(filter) if occur == Occur::MustNot => out.must_not.push(filter),
            Some(filter) => out.must.push(filter),
            None => {
                debug!(key = %node.key, value = %node.parsed_value, "keyword can match nothing");
                out.unsatisfiable = true;
            }
        }
    }
}
