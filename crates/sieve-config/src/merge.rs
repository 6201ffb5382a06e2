//! Configuration merging.
//!
//! Merges `RawConfig` files into a single resolved `Config`. Files are given closest first;
//! for every field the closest file that sets it wins. Lists are replaced, not concatenated.

use std::path::PathBuf;

use crate::{
    Config, FallbackSettings, KeywordSettings, ParserSettings,
    parse::{RawConfig, RawFallbackSettings, RawKeywordSettings, RawParserSettings},
};

/// A parsed config file with its source path.
#[derive(Debug, Clone)]
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files into a single `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to the
/// working directory), lowest precedence last (global config).
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config::default();

    // Lowest precedence first, so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(ref parser) = parsed.config.parser {
            apply_raw_parser(&mut config.parser, parser);
        }
        if let Some(ref keywords) = parsed.config.keywords {
            apply_raw_keywords(&mut config.keywords, keywords);
        }
        if let Some(ref fallback) = parsed.config.fallback {
            apply_raw_fallback(&mut config.fallback, fallback);
        }
    }

    config.config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(PathBuf::from);
    config.sources = configs.iter().map(|c| c.path.clone()).collect();
    config
}

/// Applies raw parser settings, overwriting any present values.
fn apply_raw_parser(result: &mut ParserSettings, raw: &RawParserSettings) {
    if let Some(v) = raw.max_query_length {
        result.max_query_length = v;
    }
    if let Some(v) = raw.allow_leading_wildcard {
        result.allow_leading_wildcard = v;
    }
    if let Some(v) = raw.strict_matching {
        result.strict_matching = v;
    }
    if let Some(ref v) = raw.exempt_keywords {
        result.exempt_keywords = v.clone();
    }
    if let Some(v) = raw.default_occur {
        result.default_occur = v;
    }
}

/// Applies raw keyword settings.
fn apply_raw_keywords(result: &mut KeywordSettings, raw: &RawKeywordSettings) {
    if let Some(v) = raw.max_page_ids {
        result.max_page_ids = v;
    }
    if let Some(v) = raw.max_recommendation_flags {
        result.max_recommendation_flags = v;
    }
    if let Some(v) = raw.max_categories {
        result.max_categories = v;
    }
    if let Some(v) = raw.max_topics {
        result.max_topics = v;
    }
    if let Some(ref v) = raw.disabled {
        result.disabled = v.clone();
    }
}

/// Applies raw fallback settings, including both method subsections.
fn apply_raw_fallback(result: &mut FallbackSettings, raw: &RawFallbackSettings) {
    if let Some(v) = raw.costly_call_budget {
        result.costly_call_budget = v;
    }
    if let Some(ref phrase) = raw.phrase_suggest {
        if let Some(v) = phrase.enabled {
            result.phrase_suggest.enabled = v;
        }
        if let Some(v) = phrase.rewrite {
            result.phrase_suggest.rewrite = v;
        }
        if let Some(v) = phrase.rewrite_hits_threshold {
            result.phrase_suggest.rewrite_hits_threshold = v;
        }
    }
    if let Some(ref lookup) = raw.index_lookup {
        if let Some(v) = lookup.enabled {
            result.index_lookup.enabled = v;
        }
        if let Some(v) = lookup.rewrite {
            result.index_lookup.rewrite = v;
        }
    }
}
