//! Internationalization (i18n) module for multi-language support.
//!
//! This module owns everything with real correctness concerns in the
//! service: catalog construction from nested source documents, per-request
//! language resolution, and key lookup with a deterministic fallback chain.
//! The HTTP layer in `crate::web` is a thin consumer.
//!
//! # Architecture
//!
//! - `flatten`: nested translation trees to dot-joined flat maps
//! - `catalog`: immutable per-language maps, fallback chain, snapshot swap
//! - `loader`: reads and parses `<lang>.json` documents off the hot path
//! - `resolve`: total resolution of the client's language signal
//! - `audit`: completeness comparison of every language against the default
//! - `metrics`: lookup observability (where each translation was served from)
//!
//! # Example
//!
//! ```rust,ignore
//! use polyglot_web::i18n::{resolve_language, SharedCatalog};
//!
//! let language = resolve_language(Some("ru"), &supported, "en");
//! let snapshot = shared.current();
//! let text = snapshot.translate(&language, "nav.home");
//! ```

mod audit;
mod catalog;
mod flatten;
mod loader;
mod metrics;
mod resolve;

pub use audit::{audit_catalog, log_audit, CompletenessReport};
pub use catalog::{Catalog, CatalogError, SharedCatalog};
pub use flatten::{flatten, Flattened};
pub use loader::load_catalog;
pub use metrics::{LookupMetrics, MetricsReport};
pub use resolve::resolve_language;
