//! Numeric file properties: size, bit depth, width, height and resolution.

use super::{KeywordFeature, KeywordValue, NumericRange, ParsedValue};
use crate::{
    filter::{FilterContext, FilterExpression},
    warning::{Warning, WarningCollector, keys},
};

/// Keywords accepted by [`FileNumericFeature`].
const KEYWORDS: &[&str] = &[
    "filesize",
    "filebits",
    "fileh",
    "fileheight",
    "filew",
    "filewidth",
    "fileres",
];

/// `filesize` values are written in kilobytes and stored in bytes.
const FILESIZE_MULTIPLIER: u64 = 1024;

/// Ranges on numeric file properties.
///
/// Accepted values:
///
/// - `N`: exactly `N`, or at least `N` for `filesize`
/// - `>N`: at least `N`
/// - `<N`: at most `N`
/// - `N,M`: between `N` and `M`
/// - `N,`: at least `N`
/// - `,M`: at most `M`
///
/// Anything else is reported and the directive stays literal text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileNumericFeature;

/// Returns the backend field a keyword constrains, ignoring case.
fn field_for(key: &str) -> Option<&'static str> {
    let field = match key.to_ascii_lowercase().as_str() {
        "filesize" => "file_size",
        "filebits" => "file_bits",
        "fileh" | "fileheight" => "file_height",
        "filew" | "filewidth" => "file_width",
        "fileres" => "file_resolution",
        _ => return None,
    };
    Some(field)
}

/// Parses an unsigned decimal number.
fn number(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parses a value into inclusive bounds, before unit scaling.
fn parse_bounds(value: &str, bare_is_minimum: bool) -> Option<(Option<u64>, Option<u64>)> {
    if let Some((low, high)) = value.split_once(',') {
        let low = if low.trim().is_empty() {
            None
        } else {
            Some(number(low)?)
        };
        let high = if high.trim().is_empty() {
            None
        } else {
            Some(number(high)?)
        };
        if low.is_none() && high.is_none() {
            return None;
        }
        return Some((low, high));
    }

    if let Some(rest) = value.strip_prefix('>') {
        return Some((Some(number(rest)?), None));
    }
    if let Some(rest) = value.strip_prefix('<') {
        return Some((None, Some(number(rest)?)));
    }

    let n = number(value)?;
    if bare_is_minimum {
        Some((Some(n), None))
    } else {
        Some((Some(n), Some(n)))
    }
}

impl KeywordFeature for FileNumericFeature {
    fn name(&self) -> &'static str {
        "file numeric"
    }

    fn keywords(&self) -> &[&'static str] {
        KEYWORDS
    }

    fn accepts_quoted_value(&self) -> bool {
        false
    }

    fn parse_value(
        &self,
        value: &KeywordValue<'_>,
        warnings: &mut dyn WarningCollector,
    ) -> Option<ParsedValue> {
        let field = field_for(value.key)?;
        let is_size = field == "file_size";

        let Some((gte, lte)) = parse_bounds(value.value, is_size) else {
            warnings.add_warning(Warning::new(
                keys::FILE_NUMERIC_NOT_A_NUMBER,
                [value.key, value.value],
            ));
            return None;
        };

        let scale = |n: u64| {
            if is_size {
                n.saturating_mul(FILESIZE_MULTIPLIER)
            } else {
                n
            }
        };

        Some(ParsedValue::NumericRange(NumericRange {
            field: field.to_string(),
            gte: gte.map(scale),
            lte: lte.map(scale),
        }))
    }

    fn build_filter(
        &self,
        value: &ParsedValue,
        _context: &FilterContext,
    ) -> Option<FilterExpression> {
        let ParsedValue::NumericRange(range) = value else {
            return None;
        };
        if let (Some(low), Some(high)) = (range.gte, range.lte)
            && low > high
        {
            return None;
        }
        Some(FilterExpression::Range {
            field: range.field.clone(),
            gte: range.gte,
            lte: range.lte,
        })
    }
}
