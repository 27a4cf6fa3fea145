//! Catalog completeness auditing.
//!
//! The default language is the reference key set. Every other loaded
//! language is compared against it after a build or reload: keys the
//! language lacks will be served from the default catalog, keys it has that
//! the default lacks are usually leftovers from renamed entries. Gaps are
//! warnings, never errors — an incomplete catalog still serves every request
//! through the fallback chain.

use crate::i18n::catalog::Catalog;
use tracing::{debug, warn};

/// Completeness findings for one non-default language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletenessReport {
    /// Language the report describes
    pub language: String,

    /// Keys present in the default catalog but missing here
    pub missing: Vec<String>,

    /// Keys present here but absent from the default catalog
    pub extra: Vec<String>,
}

impl CompletenessReport {
    /// Check if any default-catalog keys are untranslated in this language.
    pub fn has_missing(&self) -> bool {
        !self.missing.is_empty()
    }

    /// Check if the language carries keys the default catalog lacks.
    pub fn has_extra(&self) -> bool {
        !self.extra.is_empty()
    }

    /// Check if the language mirrors the default key set exactly.
    pub fn is_complete(&self) -> bool {
        !self.has_missing() && !self.has_extra()
    }
}

/// Compare every non-default language against the default key set.
///
/// # Returns
/// One report per non-default loaded language, ordered by language code.
/// Key lists are sorted so repeated audits produce identical output.
pub fn audit_catalog(catalog: &Catalog) -> Vec<CompletenessReport> {
    let default_language = catalog.default_language().to_string();
    let default_keys: Vec<&str> = catalog
        .keys(&default_language)
        .unwrap_or_default();

    catalog
        .languages()
        .into_iter()
        .filter(|code| *code != default_language)
        .map(|code| {
            let mut missing: Vec<String> = default_keys
                .iter()
                .filter(|key| catalog.lookup(code, key).is_none())
                .map(|key| key.to_string())
                .collect();
            missing.sort_unstable();

            let mut extra: Vec<String> = catalog
                .keys(code)
                .unwrap_or_default()
                .into_iter()
                .filter(|key| catalog.lookup(&default_language, key).is_none())
                .map(str::to_string)
                .collect();
            extra.sort_unstable();

            CompletenessReport {
                language: code.to_string(),
                missing,
                extra,
            }
        })
        .collect()
}

/// Audit a catalog and log the findings.
///
/// Called after startup loads and reloads. Complete languages log at debug,
/// gaps at warn with the counts and a sample of the affected keys.
pub fn log_audit(catalog: &Catalog) {
    for report in audit_catalog(catalog) {
        if report.is_complete() {
            debug!(language = %report.language, "catalog complete");
            continue;
        }
        warn!(
            language = %report.language,
            missing = report.missing.len(),
            extra = report.extra.len(),
            sample = ?report.missing.iter().take(5).collect::<Vec<_>>(),
            "catalog incomplete, missing keys will fall back to the default language"
        );
    }
}
