//! Query lexer (tokenizer).
//!
//! Splits a raw query into words, phrases and keyword candidates in a single left-to-right
//! pass. Positions are character offsets into the input, not byte offsets.
//!
//! # Rules
//!
//! - Whitespace separates tokens. `\ ` inside a word is a literal space and does not split.
//! - `\\` is a literal backslash and `\"` a literal quote. A lone `\` at the end of the input
//!   is kept as a literal backslash.
//! - `"` at the start of a token opens a phrase. A phrase without a closing quote runs to the
//!   end of the input. A closing quote may be followed by `~N` (slop) or a bare `~` (stemmed).
//! - `key:value` is a keyword candidate when the token starts the input or follows
//!   whitespace, `key` is made of letters, digits and `_`, and `value` is non-empty.
//! - `+` and `-` directly in front of a token bind to it as a boolean prefix.

use crate::error::QueryTooLong;

/// Maximum query length in characters, regardless of configuration.
pub const HARD_QUERY_LENGTH_LIMIT: usize = 2048;

/// Boolean prefix bound to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// `+`: the clause is required.
    Require,
    /// `-`: the clause must not match.
    Exclude,
}

/// A `key:value` token that may name a keyword feature.
///
/// Whether it does is decided by the keyword registry during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCandidate {
    /// Keyword name as typed.
    pub key: String,
    /// Value with quotes stripped and escapes resolved.
    pub value: String,
    /// Value as written, including quotes when quoted.
    pub quoted_value: String,
    /// Quote character delimiting the value, if any.
    pub delimiter: Option<char>,
    /// Characters following the closing quote of a quoted value.
    pub suffix: String,
    /// The directive as a plain term.
    ///
    /// A quoted directive is kept exactly as typed. An unquoted one has its word escapes
    /// resolved, like any other bare word. Used when no feature claims the keyword or the
    /// feature rejects the value.
    pub literal: String,
}

/// The kind of a lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A bare word with escapes resolved.
    Word(String),
    /// A quoted phrase.
    Phrase {
        /// Text between the quotes, escapes resolved.
        text: String,
        /// Proximity from a `~N` suffix.
        slop: Option<u32>,
        /// Whether a bare `~` followed the closing quote.
        stemmed: bool,
        /// Whether the closing quote was present.
        terminated: bool,
    },
    /// A `key:value` keyword candidate.
    Keyword(KeywordCandidate),
}

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What was lexed.
    pub kind: TokenKind,
    /// Boolean prefix, if one was bound.
    pub prefix: Option<Prefix>,
    /// Offset of the first character, including the prefix.
    pub start: usize,
    /// Offset of the first character after the prefix.
    pub text_start: usize,
    /// Offset one past the last character.
    pub end: usize,
}

/// Tokenizes a query string.
struct Lexer<'a> {
    /// The input as characters.
    chars: &'a [char],
    /// Current character offset.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over the given characters.
    fn new(chars: &'a [char]) -> Self {
        Self { chars, position: 0 }
    }

    /// Tokenizes the entire input.
    fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token() {
            tokens.push(token);
        }

        tokens
    }

    /// Returns the next token, or None at end of input.
    fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let start = self.position;
        self.peek()?;

        let at_boundary = start == 0 || self.chars[start - 1].is_whitespace();
        let prefix = self.read_prefix();
        let text_start = self.position;

        let kind = match self.peek() {
            Some('"') => self.read_phrase(),
            _ => {
                let keyword = if at_boundary {
                    self.read_keyword()
                } else {
                    None
                };
                keyword.map_or_else(|| TokenKind::Word(self.read_word()), TokenKind::Keyword)
            }
        };

        Some(Token {
            kind,
            prefix,
            start,
            text_start,
            end: self.position,
        })
    }

    /// Consumes a `+` or `-` prefix if it is directly followed by more token text.
    fn read_prefix(&mut self) -> Option<Prefix> {
        let prefix = match self.peek()? {
            '+' => Prefix::Require,
            '-' => Prefix::Exclude,
            _ => return None,
        };

        match self.peek_at(1) {
            Some(next) if !next.is_whitespace() => {
                self.advance();
                Some(prefix)
            }
            _ => None,
        }
    }

    /// Reads a quoted phrase and its optional `~` suffix.
    fn read_phrase(&mut self) -> TokenKind {
        self.advance(); // opening quote
        let (text, terminated) = self.read_quoted();

        let mut slop = None;
        let mut stemmed = false;
        if terminated && self.peek() == Some('~') {
            self.advance();
            let digits = self.read_while(|c| c.is_ascii_digit());
            if digits.is_empty() {
                stemmed = true;
            } else {
                slop = Some(digits.parse().unwrap_or(u32::MAX));
            }
        }

        TokenKind::Phrase {
            text,
            slop,
            stemmed,
            terminated,
        }
    }

    /// Reads quoted content up to and including the closing quote.
    ///
    /// The opening quote must already be consumed. Returns the content with `\"` and `\\`
    /// resolved, and whether a closing quote was found.
    fn read_quoted(&mut self) -> (String, bool) {
        let mut content = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance();
                    return (content, true);
                }
                '\\' if matches!(self.peek_at(1), Some('"' | '\\')) => {
                    self.advance();
                    content.push(self.chars[self.position]);
                    self.advance();
                }
                _ => {
                    content.push(ch);
                    self.advance();
                }
            }
        }

        (content, false)
    }

    /// Attempts to read a `key:value` candidate, restoring the position on failure.
    fn read_keyword(&mut self) -> Option<KeywordCandidate> {
        let start = self.position;
        let key = self.read_while(|c| c.is_alphanumeric() || c == '_');

        let valid = !key.is_empty()
            && self.peek() == Some(':')
            && self.peek_at(1).is_some_and(|c| !c.is_whitespace());
        if !valid {
            self.position = start;
            return None;
        }
        self.advance(); // colon

        let value_start = self.position;
        if self.peek() == Some('"') {
            self.advance();
            let (value, _) = self.read_quoted();
            let suffix = self.read_while(|c| !c.is_whitespace());
            let quoted_value = self.chars[value_start..self.position - suffix.chars().count()]
                .iter()
                .collect();
            return Some(KeywordCandidate {
                key,
                value,
                quoted_value,
                delimiter: Some('"'),
                suffix,
                literal: self.chars[start..self.position].iter().collect(),
            });
        }

        let value = self.read_word();
        Some(KeywordCandidate {
            literal: format!("{key}:{value}"),
            key,
            quoted_value: value.clone(),
            value,
            delimiter: None,
            suffix: String::new(),
        })
    }

    /// Reads a bare word up to the next unescaped whitespace.
    ///
    /// `\` followed by whitespace, `\` or `"` yields that character. Any other backslash is
    /// kept as written, including one at the very end of the input.
    fn read_word(&mut self) -> String {
        let mut word = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                break;
            }
            if ch == '\\'
                && let Some(next) = self.peek_at(1)
                && (next.is_whitespace() || next == '\\' || next == '"')
            {
                word.push(next);
                self.advance();
                self.advance();
                continue;
            }
            word.push(ch);
            self.advance();
        }

        word
    }

    /// Reads characters while the predicate holds.
    fn read_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Returns the current character.
    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Returns the character `offset` positions ahead.
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if self.position < self.chars.len() {
            self.position += 1;
        }
    }
}

/// Splits `input` into characters, failing first if it is over the hard ceiling.
///
/// Input of at most [`HARD_QUERY_LENGTH_LIMIT`] bytes cannot hold more characters than
/// that, so characters are only counted for longer input.
pub(crate) fn checked_chars(input: &str) -> Result<Vec<char>, QueryTooLong> {
    if input.len() > HARD_QUERY_LENGTH_LIMIT {
        let length = input.chars().count();
        if length > HARD_QUERY_LENGTH_LIMIT {
            return Err(QueryTooLong {
                length,
                limit: HARD_QUERY_LENGTH_LIMIT,
                exemptions_applied: false,
            });
        }
    }
    Ok(input.chars().collect())
}

/// Tokenizes input that has already passed the hard length check.
pub(crate) fn lex(chars: &[char]) -> Vec<Token> {
    Lexer::new(chars).tokenize()
}

/// Tokenizes a query string.
///
/// Fails only when the input is longer than [`HARD_QUERY_LENGTH_LIMIT`]; the check runs
/// before any scanning.
pub fn tokenize(input: &str) -> Result<Vec<Token>, QueryTooLong> {
    let chars = checked_chars(input)?;
    Ok(lex(&chars))
}
