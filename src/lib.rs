//! Per-request language resolution and translation catalogs for an Axum site.
//!
//! The interesting part lives in [`i18n`]: flattened translation catalogs
//! with an atomic reload snapshot, a total language resolver, and a lookup
//! chain that degrades from the requested language to the default language
//! to the raw key. [`web`] binds that to requests: a middleware resolves the
//! language from query/cookie signals, hands handlers a
//! [`web::language::Translator`], and keeps the choice sticky via a cookie.

pub mod config;
pub mod i18n;
pub mod security;
pub mod web;
