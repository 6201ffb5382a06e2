//! Query string parser.
//!
//! Turns a raw query into a [`ParsedQuery`]: a flat group of boolean clauses in source order.
//!
//! # Steps
//!
//! 1. Reject input longer than [`HARD_QUERY_LENGTH_LIMIT`].
//! 2. Reject input longer than the configured limit, after subtracting the clauses of exempt
//!    keywords.
//! 3. Lex, then turn every token into a clause. Keyword candidates are looked up in the
//!    registry; an unknown keyword or an unusable value becomes a plain word.
//!
//! Only length violations are errors. Everything else ends up as a warning on the result.

use std::{collections::BTreeSet, sync::Arc};

use tracing::debug;

use crate::{
    ast::{
        BooleanClause, BooleanGroup, EmptyQueryNode, KeywordFeatureNode, Occur, ParsedQuery,
        PhraseNode, QueryNode, WordNode,
    },
    error::QueryTooLong,
    keyword::KeywordValue,
    lexer::{
        HARD_QUERY_LENGTH_LIMIT, KeywordCandidate, Prefix, Token, TokenKind, checked_chars, lex,
    },
    registry::KeywordRegistry,
    warning::{WarningCollector, WarningList},
};

/// Default soft limit on query length, in characters.
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 300;

/// Keywords exempt from length accounting unless configured otherwise.
pub const DEFAULT_EXEMPT_KEYWORDS: &[&str] = &["incategory", "articletopic", "pageid"];

/// Settings that shape a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Soft limit on query length. `None` leaves only the hard ceiling.
    pub max_query_length: Option<usize>,
    /// Whether terms may start with a wildcard.
    pub allow_leading_wildcard: bool,
    /// Whether keyword values match exactly instead of case-folded.
    pub strict_matching: bool,
    /// Keywords whose clauses do not count towards the soft limit. Lowercase.
    pub exempt_keywords: BTreeSet<String>,
    /// Occurrence of clauses written without a prefix.
    pub default_occur: Occur,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_query_length: Some(DEFAULT_MAX_QUERY_LENGTH),
            allow_leading_wildcard: true,
            strict_matching: false,
            exempt_keywords: DEFAULT_EXEMPT_KEYWORDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            default_occur: Occur::Must,
        }
    }
}

impl ParserConfig {
    /// Returns the soft limit actually enforced, which never exceeds the hard ceiling.
    pub fn effective_limit(&self) -> usize {
        self.max_query_length
            .unwrap_or(HARD_QUERY_LENGTH_LIMIT)
            .min(HARD_QUERY_LENGTH_LIMIT)
    }

    /// Returns true if clauses of `key` are left out of length accounting.
    pub fn is_exempt(&self, key: &str) -> bool {
        self.exempt_keywords.contains(&key.to_ascii_lowercase())
    }
}

/// Parses query strings against a keyword registry.
///
/// The parser holds no per-query state; one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct QueryStringParser {
    /// Keyword features consulted for `key:value` candidates.
    registry: Arc<KeywordRegistry>,
    /// Parse settings.
    config: ParserConfig,
}

impl QueryStringParser {
    /// Creates a parser.
    pub fn new(registry: Arc<KeywordRegistry>, config: ParserConfig) -> Self {
        Self { registry, config }
    }

    /// Returns the keyword registry.
    pub fn registry(&self) -> &KeywordRegistry {
        &self.registry
    }

    /// Returns the parse settings.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a raw query.
    ///
    /// Fails only when the query is too long. Blank input yields an empty query, which callers
    /// treat as matching everything.
    pub fn parse(&self, input: &str) -> Result<ParsedQuery, QueryTooLong> {
        let chars = checked_chars(input)?;

        let tokens = lex(&chars);
        self.check_soft_limit(chars.len(), &tokens)?;

        if tokens.is_empty() {
            let root = QueryNode::Empty(EmptyQueryNode::default());
            return Ok(ParsedQuery::new(input, root, Vec::new()));
        }

        let mut warnings = WarningList::new();
        let clauses: Vec<BooleanClause> = tokens
            .into_iter()
            .map(|token| self.build_clause(token, &mut warnings))
            .collect();

        let start = clauses.first().map_or(0, |c| c.start);
        let end = clauses.last().map_or(0, |c| c.end);
        debug!(
            clauses = clauses.len(),
            warnings = warnings.len(),
            "parsed query"
        );

        let root = QueryNode::Group(BooleanGroup {
            clauses,
            start,
            end,
        });
        Ok(ParsedQuery::new(input, root, warnings.into_vec()))
    }

    /// Checks the configured limit, discounting exempt keyword clauses.
    fn check_soft_limit(&self, length: usize, tokens: &[Token]) -> Result<(), QueryTooLong> {
        let limit = self.config.effective_limit();
        if length <= limit {
            return Ok(());
        }

        let exempt: usize = tokens
            .iter()
            .filter_map(|token| match &token.kind {
                TokenKind::Keyword(candidate) if self.config.is_exempt(&candidate.key) => {
                    Some(token.end - token.start)
                }
                _ => None,
            })
            .sum();

        let adjusted = length.saturating_sub(exempt);
        if adjusted > limit {
            return Err(QueryTooLong {
                length: adjusted,
                limit,
                exemptions_applied: exempt > 0,
            });
        }
        Ok(())
    }

    /// Turns one token into a clause.
    fn build_clause(&self, token: Token, warnings: &mut dyn WarningCollector) -> BooleanClause {
        let (occur, explicit) = match token.prefix {
            Some(Prefix::Require) => (Occur::Must, true),
            Some(Prefix::Exclude) => (Occur::MustNot, true),
            None => (self.config.default_occur, false),
        };

        let start = token.text_start;
        let end = token.end;
        let node = match token.kind {
            TokenKind::Word(text) => QueryNode::Word(WordNode { text, start, end }),
            TokenKind::Phrase {
                text,
                slop,
                stemmed,
                terminated,
            } => QueryNode::Phrase(PhraseNode {
                phrase: text,
                slop,
                stemmed,
                unterminated: !terminated,
                start,
                end,
            }),
            TokenKind::Keyword(candidate) => {
                let negated = occur == Occur::MustNot;
                self.build_keyword(candidate, negated, start, end, warnings)
            }
        };

        BooleanClause {
            occur,
            explicit,
            node,
            start: token.start,
            end,
        }
    }

    /// Resolves a keyword candidate, falling back to a plain word.
    fn build_keyword(
        &self,
        candidate: KeywordCandidate,
        negated: bool,
        start: usize,
        end: usize,
        warnings: &mut dyn WarningCollector,
    ) -> QueryNode {
        let Some(feature) = self.registry.find(&candidate.key) else {
            debug!(key = %candidate.key, "unknown keyword, kept as text");
            return literal_word(&candidate, start, end);
        };

        if candidate.delimiter.is_some() && !feature.accepts_quoted_value() {
            debug!(key = %candidate.key, "quoted value not accepted, kept as text");
            return literal_word(&candidate, start, end);
        }

        let value = KeywordValue {
            key: &candidate.key,
            value: &candidate.value,
            quoted_value: &candidate.quoted_value,
            delimiter: candidate.delimiter,
            suffix: &candidate.suffix,
        };
        let Some(parsed_value) = feature.parse_value(&value, warnings) else {
            debug!(key = %candidate.key, "keyword value not usable, kept as text");
            return literal_word(&candidate, start, end);
        };

        QueryNode::Keyword(KeywordFeatureNode {
            key: candidate.key,
            value: candidate.value,
            quoted_value: candidate.quoted_value,
            delimiter: candidate.delimiter,
            suffix: candidate.suffix,
            parsed_value,
            negated,
            start,
            end,
        })
    }
}

/// Builds the word a keyword candidate degrades to.
fn literal_word(candidate: &KeywordCandidate, start: usize, end: usize) -> QueryNode {
    QueryNode::Word(WordNode {
        text: candidate.literal.clone(),
        start,
        end,
    })
}
