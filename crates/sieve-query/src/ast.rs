//! Query abstract syntax tree.
//!
//! The parser produces a [`ParsedQuery`] whose root is either an [`EmptyQueryNode`] or a
//! [`BooleanGroup`] of clauses in source order. Offsets are character offsets into the raw
//! query.

use std::fmt;

use serde::Serialize;

use crate::{keyword::ParsedValue, warning::Warning};

/// Occurrence modifier of a boolean clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Occur {
    /// The clause must match.
    Must,
    /// The clause must not match.
    MustNot,
    /// The clause should match.
    Should,
}

impl Occur {
    /// Returns the query-string prefix for this occurrence.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Must => "+",
            Self::MustNot => "-",
            Self::Should => "",
        }
    }
}

impl fmt::Display for Occur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Must => "MUST",
            Self::MustNot => "MUST_NOT",
            Self::Should => "SHOULD",
        };
        write!(f, "{name}")
    }
}

/// A bare, unquoted term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordNode {
    /// Term text with escapes resolved.
    pub text: String,
    /// Start offset.
    pub start: usize,
    /// End offset.
    pub end: usize,
}

/// A quoted phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseNode {
    /// Text between the quotes.
    pub phrase: String,
    /// Proximity from a `~N` suffix.
    pub slop: Option<u32>,
    /// Whether the phrase carried a bare `~` marker.
    pub stemmed: bool,
    /// Whether the closing quote was missing.
    pub unterminated: bool,
    /// Start offset (the opening quote).
    pub start: usize,
    /// End offset.
    pub end: usize,
}

/// A recognized `keyword:value` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordFeatureNode {
    /// Keyword as typed.
    pub key: String,
    /// Value with quotes stripped.
    pub value: String,
    /// Value as written.
    pub quoted_value: String,
    /// Quote character delimiting the value, if any.
    pub delimiter: Option<char>,
    /// Characters after the closing quote.
    pub suffix: String,
    /// Value as understood by the keyword's feature.
    pub parsed_value: ParsedValue,
    /// Whether the directive was prefixed with `-`.
    pub negated: bool,
    /// Start offset (the keyword, after any prefix).
    pub start: usize,
    /// End offset.
    pub end: usize,
}

/// A node wrapped with an occurrence modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BooleanClause {
    /// How the node participates in matching.
    pub occur: Occur,
    /// Whether the modifier was written in the query.
    pub explicit: bool,
    /// The wrapped node.
    pub node: QueryNode,
    /// Start offset, including any prefix character.
    pub start: usize,
    /// End offset.
    pub end: usize,
}

/// An ordered sequence of clauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BooleanGroup {
    /// Clauses in source order.
    pub clauses: Vec<BooleanClause>,
    /// Start offset of the first clause.
    pub start: usize,
    /// End offset of the last clause.
    pub end: usize,
}

/// Sentinel for a blank query. Always spans (0, 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmptyQueryNode {
    /// Start offset.
    pub start: usize,
    /// End offset.
    pub end: usize,
}

/// A node of the query tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryNode {
    /// A bare term.
    Word(WordNode),
    /// A quoted phrase.
    Phrase(PhraseNode),
    /// A keyword directive.
    Keyword(KeywordFeatureNode),
    /// A node with an occurrence modifier.
    Clause(Box<BooleanClause>),
    /// A sequence of clauses.
    Group(BooleanGroup),
    /// Blank input.
    Empty(EmptyQueryNode),
}

impl QueryNode {
    /// Returns the start offset of the node.
    pub fn start(&self) -> usize {
        match self {
            Self::Word(n) => n.start,
            Self::Phrase(n) => n.start,
            Self::Keyword(n) => n.start,
            Self::Clause(n) => n.start,
            Self::Group(n) => n.start,
            Self::Empty(n) => n.start,
        }
    }

    /// Returns the end offset of the node.
    pub fn end(&self) -> usize {
        match self {
            Self::Word(n) => n.end,
            Self::Phrase(n) => n.end,
            Self::Keyword(n) => n.end,
            Self::Clause(n) => n.end,
            Self::Group(n) => n.end,
            Self::Empty(n) => n.end,
        }
    }

    /// Formats the node as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Word(n) => writeln!(f, "{prefix}Word({:?}) [{}..{}]", n.text, n.start, n.end),
            Self::Phrase(n) => {
                write!(f, "{prefix}Phrase({:?}", n.phrase)?;
                if let Some(slop) = n.slop {
                    write!(f, " ~{slop}")?;
                }
                if n.stemmed {
                    write!(f, " stemmed")?;
                }
                if n.unterminated {
                    write!(f, " unterminated")?;
                }
                writeln!(f, ") [{}..{}]", n.start, n.end)
            }
            Self::Keyword(n) => {
                let negated = if n.negated { " negated" } else { "" };
                writeln!(
                    f,
                    "{prefix}Keyword({}:{}{negated}) [{}..{}]",
                    n.key, n.quoted_value, n.start, n.end
                )?;
                writeln!(f, "{prefix}  {}", n.parsed_value)
            }
            Self::Clause(clause) => clause.fmt_tree(f, indent),
            Self::Group(group) => {
                writeln!(f, "{prefix}Group [{}..{}]", group.start, group.end)?;
                for clause in &group.clauses {
                    clause.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Empty(_) => writeln!(f, "{prefix}Empty"),
        }
    }
}

impl BooleanClause {
    /// Formats the clause and its node.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        let explicit = if self.explicit { " explicit" } else { "" };
        writeln!(f, "{prefix}{}{explicit}", self.occur)?;
        self.node.fmt_tree(f, indent + 1)
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// The result of parsing one query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    /// The raw query.
    query: String,
    /// Root of the tree: a group, or the empty sentinel.
    root: QueryNode,
    /// Recoverable issues found while parsing.
    warnings: Vec<Warning>,
}

impl ParsedQuery {
    /// Creates a parsed query.
    pub(crate) fn new(query: impl Into<String>, root: QueryNode, warnings: Vec<Warning>) -> Self {
        Self {
            query: query.into(),
            root,
            warnings,
        }
    }

    /// Returns the raw query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the root node.
    pub fn root(&self) -> &QueryNode {
        &self.root
    }

    /// Returns the warnings collected while parsing.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Returns true if the query was blank.
    ///
    /// A blank query matches everything; it carries no filters.
    pub fn is_empty(&self) -> bool {
        matches!(self.root, QueryNode::Empty(_))
    }

    /// Returns the top-level clauses, or an empty slice for a blank query.
    pub fn clauses(&self) -> &[BooleanClause] {
        match &self.root {
            QueryNode::Group(group) => &group.clauses,
            _ => &[],
        }
    }

    /// Returns the keyword directives at the top level, in source order.
    pub fn keyword_nodes(&self) -> impl Iterator<Item = &KeywordFeatureNode> {
        self.clauses().iter().filter_map(|clause| match &clause.node {
            QueryNode::Keyword(node) => Some(node),
            _ => None,
        })
    }

    /// Returns true if any non-excluded word or phrase carries text.
    ///
    /// Queries made only of keyword directives have nothing to suggest a correction for.
    pub fn has_candidate_terms(&self) -> bool {
        !self.free_text().is_empty()
    }

    /// Joins the text of non-excluded words and phrases, phrases in quotes.
    pub fn free_text(&self) -> String {
        let parts: Vec<String> = self
            .clauses()
            .iter()
            .filter(|clause| clause.occur != Occur::MustNot)
            .filter_map(|clause| match &clause.node {
                QueryNode::Word(word) if !word.text.is_empty() => Some(word.text.clone()),
                QueryNode::Phrase(phrase) if !phrase.phrase.is_empty() => {
                    Some(format!("\"{}\"", phrase.phrase))
                }
                _ => None,
            })
            .collect();
        parts.join(" ")
    }
}
