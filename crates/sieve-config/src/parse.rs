//! Configuration file parsing.
//!
//! Parses individual `.sieve.toml` files into `RawConfig` structures that keep every field
//! optional until files are merged.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::{ConfigError, OccurSetting};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Parser section.
    pub parser: Option<RawParserSettings>,
    /// Keyword section.
    pub keywords: Option<RawKeywordSettings>,
    /// Fallback section.
    pub fallback: Option<RawFallbackSettings>,
}

/// Raw `[parser]` settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawParserSettings {
    /// Soft limit on query length in characters.
    pub max_query_length: Option<usize>,
    /// Whether terms may start with a wildcard.
    pub allow_leading_wildcard: Option<bool>,
    /// Whether keyword values match exactly.
    pub strict_matching: Option<bool>,
    /// Keywords left out of length accounting. A single string or a list.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub exempt_keywords: Option<Vec<String>>,
    /// Occurrence of unprefixed clauses.
    pub default_occur: Option<OccurSetting>,
}

/// Raw `[keywords]` settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawKeywordSettings {
    /// Cap on `pageid:` entries.
    pub max_page_ids: Option<usize>,
    /// Cap on `hasrecommendation:` entries.
    pub max_recommendation_flags: Option<usize>,
    /// Cap on `incategory:` entries.
    pub max_categories: Option<usize>,
    /// Cap on `articletopic:` entries.
    pub max_topics: Option<usize>,
    /// Keywords whose features are not registered. A single string or a list.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub disabled: Option<Vec<String>>,
}

/// Raw `[fallback]` settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawFallbackSettings {
    /// Costly calls allowed per request.
    pub costly_call_budget: Option<usize>,
    /// `[fallback.phrase_suggest]` subsection.
    pub phrase_suggest: Option<RawPhraseSuggestSettings>,
    /// `[fallback.index_lookup]` subsection.
    pub index_lookup: Option<RawIndexLookupSettings>,
}

/// Raw `[fallback.phrase_suggest]` settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawPhraseSuggestSettings {
    /// Whether the method runs.
    pub enabled: Option<bool>,
    /// Whether the method may rewrite the query.
    pub rewrite: Option<bool>,
    /// Rewrite below this many hits.
    pub rewrite_hits_threshold: Option<u64>,
}

/// Raw `[fallback.index_lookup]` settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawIndexLookupSettings {
    /// Whether the method runs.
    pub enabled: Option<bool>,
    /// Whether the method may rewrite the query.
    pub rewrite: Option<bool>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
