//! Loading translation source documents from disk.
//!
//! One JSON file per supported language, `<locales_dir>/<lang>.json`. File
//! I/O and parsing stop here; the catalog itself only ever sees parsed trees.
//! A failure for the default language aborts the build, any other language is
//! logged and skipped — requests for it then fall back to the default through
//! the normal lookup chain.

use crate::i18n::catalog::{Catalog, CatalogError};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{info, warn};

/// Read and parse one language's source document.
fn read_language_tree(dir: &Path, language: &str) -> Result<Map<String, Value>, CatalogError> {
    let path = dir.join(format!("{language}.json"));

    let content = std::fs::read_to_string(&path).map_err(|source| CatalogError::ReadFailed {
        language: language.to_string(),
        path: path.clone(),
        source,
    })?;

    let value: Value =
        serde_json::from_str(&content).map_err(|source| CatalogError::ParseFailed {
            language: language.to_string(),
            path: path.clone(),
            source,
        })?;

    match value {
        Value::Object(tree) => Ok(tree),
        _ => Err(CatalogError::NotAnObject {
            language: language.to_string(),
        }),
    }
}

/// Build a catalog from the locales directory.
///
/// # Arguments
/// * `dir` - Directory holding `<lang>.json` files
/// * `supported` - Language codes to load, in configured order
/// * `default_language` - Language whose document must load successfully
///
/// # Returns
/// The built catalog. Fails only when the default language cannot be read or
/// parsed; other languages degrade to a warning and are left out.
pub fn load_catalog(
    dir: &Path,
    supported: &[String],
    default_language: &str,
) -> Result<Catalog, CatalogError> {
    let mut trees = Vec::with_capacity(supported.len());

    for language in supported {
        match read_language_tree(dir, language) {
            Ok(tree) => trees.push((language.clone(), tree)),
            Err(err) if language.as_str() == default_language => return Err(err),
            Err(err) => {
                warn!(language = %language, error = %err, "skipping language, translations failed to load");
            }
        }
    }

    let catalog = Catalog::from_trees(default_language, trees)?;
    for language in catalog.languages() {
        info!(
            language = %language,
            keys = catalog.key_count(language).unwrap_or(0),
            "loaded translations"
        );
    }
    Ok(catalog)
}
