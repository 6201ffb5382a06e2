//! Escaping of query text for the backend query-string syntax.

/// Characters with meaning in the backend query-string syntax, excluding wildcards.
const RESERVED: &[char] = &[
    '+', '-', '=', '&', '|', '>', '<', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', ':',
    '\\', '/',
];

/// Returns true for the single and multi character wildcards.
fn is_wildcard(ch: char) -> bool {
    ch == '*' || ch == '?'
}

/// Escapes a term for inclusion in a backend query string.
///
/// Reserved characters and whitespace are backslash-escaped, so a term always reaches the
/// backend as a single term. The wildcards `*` and `?` keep their meaning inside a term; a
/// run of wildcards at the start of the term is escaped unless `allow_leading_wildcard` is
/// set. Anything else passes through unchanged.
pub fn escape_for_backend(term: &str, allow_leading_wildcard: bool) -> String {
    let mut escaped = String::with_capacity(term.len() + 4);
    let mut leading = true;

    for ch in term.chars() {
        if is_wildcard(ch) {
            if leading && !allow_leading_wildcard {
                escaped.push('\\');
            }
            escaped.push(ch);
            continue;
        }

        leading = false;
        if RESERVED.contains(&ch) || ch.is_whitespace() {
            escaped.push('\\');
        }
        escaped.push(ch);
    }

    escaped
}

/// Escapes text for use between double quotes in a backend phrase query.
///
/// Only `"` and `\` need escaping inside a phrase.
pub fn escape_phrase(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
