//! Translation catalogs and the process-wide swappable snapshot.
//!
//! A [`Catalog`] holds one flattened key/value map per language plus the
//! default language used by the fallback chain. It is built once and never
//! mutated afterwards, which makes it safe to share across every in-flight
//! request. [`SharedCatalog`] is the swap point: readers grab the current
//! `Arc<Catalog>` snapshot, a reload builds a complete replacement off to the
//! side and publishes it with a single pointer swap. No reader ever sees a
//! half-built catalog and no lock is held while a build runs.

use crate::i18n::flatten::flatten;
use crate::i18n::metrics::LookupMetrics;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while building a catalog.
///
/// Only the default language is load-bearing: if its document cannot be
/// obtained the whole build fails. Failures for other languages are handled
/// by the loader (logged and skipped) and never reach this enum.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no translations loaded for default language '{language}'")]
    DefaultLanguageMissing { language: String },

    #[error("failed to read translations for '{language}' from {path}")]
    ReadFailed {
        language: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse translations for '{language}' from {path}")]
    ParseFailed {
        language: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("translation document for '{language}' is not a JSON object")]
    NotAnObject { language: String },
}

/// Immutable set of per-language flattened translation maps.
#[derive(Debug)]
pub struct Catalog {
    /// Language code to flat key/value map
    languages: HashMap<String, HashMap<String, String>>,

    /// Language the fallback chain lands on before giving up
    default_language: String,
}

impl Catalog {
    /// Build a catalog from parsed source trees, one per language.
    ///
    /// Each tree is flattened into dot-joined keys. Compound-key collisions
    /// within a language are logged as warnings and resolved last-write-wins.
    ///
    /// # Arguments
    /// * `default_language` - Language the fallback chain uses; a tree for it
    ///   must be present
    /// * `trees` - `(language code, parsed source document)` pairs
    ///
    /// # Returns
    /// The built catalog, or [`CatalogError::DefaultLanguageMissing`] when no
    /// tree was supplied for the default language.
    pub fn from_trees(
        default_language: &str,
        trees: Vec<(String, Map<String, Value>)>,
    ) -> Result<Self, CatalogError> {
        let mut languages = HashMap::new();

        for (code, tree) in trees {
            let flattened = flatten(&tree);
            for key in &flattened.duplicates {
                warn!(
                    language = %code,
                    key = %key,
                    "duplicate translation key, keeping the last value seen"
                );
            }
            languages.insert(code, flattened.entries);
        }

        if !languages.contains_key(default_language) {
            return Err(CatalogError::DefaultLanguageMissing {
                language: default_language.to_string(),
            });
        }

        Ok(Self {
            languages,
            default_language: default_language.to_string(),
        })
    }

    /// Look up a key in one language's map.
    ///
    /// Absence is distinct from an empty translation: `None` means the key is
    /// not in that language's catalog, and only then does [`translate`]
    /// continue down the fallback chain.
    ///
    /// [`translate`]: Catalog::translate
    pub fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.languages
            .get(language)?
            .get(key)
            .map(String::as_str)
    }

    /// Translate a key with the full fallback chain.
    ///
    /// Tries the requested language, then the default language, then returns
    /// the key itself. A raw key in rendered output is a deliberate marker
    /// for a missing translation, so this never fails and never logs above
    /// debug level.
    pub fn translate(&self, language: &str, key: &str) -> String {
        if let Some(text) = self.lookup(language, key) {
            LookupMetrics::global().record_requested_hit();
            return text.to_string();
        }

        if language != self.default_language {
            if let Some(text) = self.lookup(&self.default_language, key) {
                LookupMetrics::global().record_default_fallback();
                return text.to_string();
            }
        }

        LookupMetrics::global().record_key_fallback();
        debug!(language = %language, key = %key, "no translation found, serving raw key");
        key.to_string()
    }

    /// The language the fallback chain uses.
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Check whether a language has a loaded map.
    pub fn has_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Loaded language codes, sorted for stable output.
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Number of keys loaded for a language, if present.
    pub fn key_count(&self, language: &str) -> Option<usize> {
        self.languages.get(language).map(HashMap::len)
    }

    /// Keys loaded for a language, if present. Unordered.
    pub fn keys(&self, language: &str) -> Option<Vec<&str>> {
        self.languages
            .get(language)
            .map(|map| map.keys().map(String::as_str).collect())
    }
}

/// Process-wide handle to the current catalog snapshot.
///
/// Cloning is cheap and every clone observes the same snapshot sequence.
/// Readers take the inner lock only long enough to clone an `Arc`, so
/// concurrent requests never serialize against each other or against an
/// in-progress rebuild.
#[derive(Clone)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Arc<Catalog>>>,
}

impl SharedCatalog {
    /// Wrap an initial catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Get the current snapshot.
    ///
    /// The returned `Arc` stays valid for the caller's whole request even if
    /// a reload publishes a newer catalog in the meantime.
    pub fn current(&self) -> Arc<Catalog> {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Publish a fully built replacement catalog.
    pub fn replace(&self, catalog: Catalog) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(catalog);
    }
}
