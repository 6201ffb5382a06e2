//! Ordered collection of keyword features.

use std::sync::Arc;

use tracing::debug;

use crate::{
    error::RegistryError,
    keyword::{KeywordFeature, KeywordLimits, builtin_features},
};

/// Source name recorded for built-in features.
pub const BUILTIN_SOURCE: &str = "builtin";

/// A feature together with the source that registered it.
#[derive(Debug, Clone)]
pub struct RegisteredFeature {
    /// Who registered the feature: [`BUILTIN_SOURCE`] or an extension name.
    pub source: String,
    /// The feature itself.
    pub feature: Arc<dyn KeywordFeature>,
}

/// The active keyword features, in registration order.
///
/// Built-ins come first, extension features after them. No two features claim the same
/// keyword, compared case-insensitively. A registry is immutable once built and can be
/// shared between threads.
#[derive(Debug, Clone, Default)]
pub struct KeywordRegistry {
    /// Registered features.
    features: Vec<RegisteredFeature>,
}

impl KeywordRegistry {
    /// Starts building a registry.
    pub fn builder() -> KeywordRegistryBuilder {
        KeywordRegistryBuilder::default()
    }

    /// Returns a registry holding only the built-in features with default limits.
    pub fn builtin() -> Self {
        let features = builtin_features(&KeywordLimits::default())
            .into_iter()
            .map(|feature| RegisteredFeature {
                source: BUILTIN_SOURCE.to_string(),
                feature,
            })
            .collect();
        Self { features }
    }

    /// Returns the features in registration order.
    pub fn features(&self) -> impl Iterator<Item = &Arc<dyn KeywordFeature>> {
        self.features.iter().map(|entry| &entry.feature)
    }

    /// Returns the registered entries, with their sources.
    pub fn entries(&self) -> &[RegisteredFeature] {
        &self.features
    }

    /// Finds the feature answering to `key`, ignoring case.
    ///
    /// Features are tried in registration order and the first match wins.
    pub fn find(&self, key: &str) -> Option<&Arc<dyn KeywordFeature>> {
        self.features().find(|feature| {
            feature
                .keywords()
                .iter()
                .any(|keyword| keyword.eq_ignore_ascii_case(key))
        })
    }

    /// Returns true if some feature answers to `key`.
    pub fn is_registered(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Returns the number of registered features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if no features are registered.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Assembles a [`KeywordRegistry`] from built-ins and extension sources.
#[derive(Debug, Default)]
pub struct KeywordRegistryBuilder {
    /// Features collected so far, in order.
    features: Vec<RegisteredFeature>,
}

impl KeywordRegistryBuilder {
    /// Adds the built-in features with the given caps.
    pub fn with_builtins(self, limits: &KeywordLimits) -> Self {
        self.source(BUILTIN_SOURCE, builtin_features(limits))
    }

    /// Adds features contributed by `source`, after everything added so far.
    pub fn source(
        mut self,
        source: &str,
        features: impl IntoIterator<Item = Arc<dyn KeywordFeature>>,
    ) -> Self {
        self.features
            .extend(features.into_iter().map(|feature| RegisteredFeature {
                source: source.to_string(),
                feature,
            }));
        self
    }

    /// Keeps only the features added so far for which `keep` returns true.
    pub fn retain(mut self, keep: impl Fn(&dyn KeywordFeature) -> bool) -> Self {
        self.features.retain(|entry| keep(entry.feature.as_ref()));
        self
    }

    /// Builds the registry.
    ///
    /// Fails if two features claim the same keyword.
    pub fn build(self) -> Result<KeywordRegistry, RegistryError> {
        let mut claimed: Vec<(String, &str)> = Vec::new();
        for entry in &self.features {
            for keyword in entry.feature.keywords() {
                let keyword = keyword.to_ascii_lowercase();
                if let Some((_, first)) = claimed.iter().find(|(k, _)| *k == keyword) {
                    return Err(RegistryError::DuplicateKeyword {
                        keyword,
                        first: (*first).to_string(),
                        second: entry.source.clone(),
                    });
                }
                claimed.push((keyword, &entry.source));
            }
        }

        debug!(
            features = self.features.len(),
            keywords = claimed.len(),
            "keyword registry built"
        );
        Ok(KeywordRegistry {
            features: self.features,
        })
    }
}
