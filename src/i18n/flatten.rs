//! Catalog flattening: nested translation trees to dot-joined flat maps.
//!
//! Translation source documents are arbitrarily nested JSON objects whose
//! leaves are strings. Lookups want a single-level map, so the tree is
//! flattened by joining the path of field names with `.`:
//!
//! ```json
//! { "nav": { "home": "Home" } }  =>  { "nav.home": "Home" }
//! ```
//!
//! Non-string, non-object leaves (numbers, booleans, nulls, arrays) carry no
//! translatable text and are skipped. Two branches of a tree can produce the
//! same compound key (a literal `"a.b"` field next to `{ "a": { "b": .. } }`);
//! the last value visited wins in the returned map and the collision is
//! reported so the catalog build can warn about it.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Result of flattening one language's source tree.
#[derive(Debug, Default)]
pub struct Flattened {
    /// Dot-joined key to translated text.
    pub entries: HashMap<String, String>,

    /// Compound keys that were produced by more than one branch of the tree.
    pub duplicates: Vec<String>,
}

impl Flattened {
    /// Check whether any compound key collided during flattening.
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// Flatten a nested translation tree into a single-level map.
///
/// # Arguments
/// * `tree` - The parsed source document for one language
///
/// # Returns
/// A [`Flattened`] holding one entry per string leaf, keyed by the dot-joined
/// path from the root to that leaf, plus the list of collided keys.
pub fn flatten(tree: &Map<String, Value>) -> Flattened {
    let mut flattened = Flattened::default();
    walk(tree, "", &mut flattened);
    flattened
}

fn walk(node: &Map<String, Value>, prefix: &str, out: &mut Flattened) {
    for (field, value) in node {
        let key = if prefix.is_empty() {
            field.clone()
        } else {
            format!("{prefix}.{field}")
        };

        match value {
            Value::String(text) => {
                if out.entries.insert(key.clone(), text.clone()).is_some() {
                    out.duplicates.push(key);
                }
            }
            Value::Object(children) => walk(children, &key, out),
            // No translatable text in these; excluded, not an error.
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) => {}
        }
    }
}
