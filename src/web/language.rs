//! Per-request language binding and the language-facing endpoints.
//!
//! The middleware runs before any handler that renders text: it reads the
//! client's language signal (query parameter `lang` takes precedence over the
//! `lang` cookie), resolves it against the configured set, and inserts a
//! [`Translator`] into the request extensions. The choice is made sticky by
//! writing back a year-long HttpOnly cookie whenever it differs from what the
//! client sent.
//!
//! `/language` is the explicit change endpoint; `/i18n/reload` rebuilds the
//! catalog behind an admin key and swaps it in atomically.

use crate::i18n::{load_catalog, log_audit, resolve_language, Catalog};
use crate::security::verify_admin_key;
use crate::web::AppState;
use axum::{
    extract::{Query, Request, State},
    http::{header, HeaderMap, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use time::Duration;
use tracing::{error, info};

/// Cookie carrying the sticky language choice.
pub const LANG_COOKIE: &str = "lang";

/// Cookie lifetime. A year keeps the choice across sessions without the
/// client ever needing the query parameter again.
const COOKIE_MAX_AGE: Duration = Duration::days(365);

/// Per-request translation handle.
///
/// Holds the effective language and the catalog snapshot the request was
/// bound to. Created by the middleware, dropped with the request; a reload
/// mid-request cannot change what this request renders.
#[derive(Clone)]
pub struct Translator {
    catalog: Arc<Catalog>,
    language: String,
}

impl Translator {
    pub fn new(catalog: Arc<Catalog>, language: String) -> Self {
        Self { catalog, language }
    }

    /// The effective language this request is served in.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translate a key through the fallback chain.
    pub fn t(&self, key: &str) -> String {
        self.catalog.translate(&self.language, key)
    }

    /// Translate a key and substitute `{name}` placeholders.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.t(key);
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }
}

fn query_lang(uri: &Uri) -> Option<String> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    params.get("lang").cloned()
}

fn persistent_language_cookie(language: &str) -> Cookie<'static> {
    Cookie::build((LANG_COOKIE, language.to_string()))
        .path("/")
        .http_only(true)
        .max_age(COOKIE_MAX_AGE)
        .build()
}

/// Request binder: resolve the language and expose a [`Translator`].
///
/// Runs once per request. The cookie is (re)written only when the effective
/// language differs from what the client's cookie currently holds, so
/// steady-state requests carry no `Set-Cookie` header.
pub async fn language_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_signal = jar.get(LANG_COOKIE).map(|cookie| cookie.value().to_string());
    let signal = query_lang(request.uri()).or_else(|| cookie_signal.clone());

    let language = resolve_language(
        signal.as_deref(),
        &state.config.supported_languages,
        &state.config.default_language,
    );

    let translator = Translator::new(state.catalog.current(), language.clone());
    request.extensions_mut().insert(translator);

    let response = next.run(request).await;

    if cookie_signal.as_deref() == Some(language.as_str()) {
        response
    } else {
        let jar = jar.add(persistent_language_cookie(&language));
        (jar, response).into_response()
    }
}

/// Explicit language change: `GET /language?lang=<code>`.
///
/// Unsupported codes are a client error and change nothing. On success the
/// response names the redirect target — the referring page when known, the
/// site root otherwise — and the cookie is set for future requests.
pub async fn set_language(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let requested = params.get("lang").map(String::as_str).unwrap_or("");
    let language = if requested.is_empty() {
        state.config.default_language.as_str()
    } else {
        requested
    };

    if !state
        .config
        .supported_languages
        .iter()
        .any(|code| code == language)
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "unsupported language" })),
        )
            .into_response();
    }

    let redirect = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/");

    let body = Json(json!({
        "status": "success",
        "lang": language,
        "redirect": redirect,
    }));
    let jar = jar.add(persistent_language_cookie(language));
    (jar, body).into_response()
}

/// Administrative catalog reload: `POST /i18n/reload`.
///
/// Builds a complete replacement catalog before touching the shared
/// snapshot; a failed build leaves the current catalog serving. Disabled
/// entirely unless an admin key is configured.
pub async fn reload_catalog(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(expected) = state.config.admin_api_key.as_deref() else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "reload is not enabled" })),
        )
            .into_response();
    };

    let provided = headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    if !verify_admin_key(provided, expected) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid api key" })),
        )
            .into_response();
    }

    match load_catalog(
        Path::new(&state.config.locales_dir),
        &state.config.supported_languages,
        &state.config.default_language,
    ) {
        Ok(catalog) => {
            log_audit(&catalog);
            let languages: Vec<String> = catalog
                .languages()
                .into_iter()
                .map(str::to_string)
                .collect();
            state.catalog.replace(catalog);
            info!(languages = ?languages, "catalog reloaded");
            Json(json!({ "status": "success", "languages": languages })).into_response()
        }
        Err(err) => {
            error!(error = %err, "catalog reload failed, keeping the current snapshot");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use serde_json::{Map, Value};

    fn catalog() -> Arc<Catalog> {
        let tree = |value: Value| -> Map<String, Value> {
            match value {
                Value::Object(map) => map,
                other => panic!("test tree must be an object, got {other:?}"),
            }
        };
        Arc::new(
            Catalog::from_trees(
                "en",
                vec![
                    (
                        "en".to_string(),
                        tree(json!({
                            "greet": "Hello, {name}!",
                            "nav": { "home": "Home" }
                        })),
                    ),
                    ("ru".to_string(), tree(json!({ "nav": { "home": "Главная" } }))),
                ],
            )
            .expect("catalog builds"),
        )
    }

    // ==================== Translator Tests ====================

    #[test]
    fn test_translator_uses_bound_language() {
        let translator = Translator::new(catalog(), "ru".to_string());
        assert_eq!(translator.language(), "ru");
        assert_eq!(translator.t("nav.home"), "Главная");
    }

    #[test]
    fn test_translator_falls_back_for_bound_language() {
        let translator = Translator::new(catalog(), "ru".to_string());
        assert_eq!(translator.t("greet"), "Hello, {name}!");
        assert_eq!(translator.t("missing.key"), "missing.key");
    }

    #[test]
    fn test_t_with_substitutes_placeholders() {
        let translator = Translator::new(catalog(), "en".to_string());
        assert_eq!(translator.t_with("greet", &[("name", "Ada")]), "Hello, Ada!");
    }

    #[test]
    fn test_t_with_leaves_unknown_placeholders() {
        let translator = Translator::new(catalog(), "en".to_string());
        assert_eq!(
            translator.t_with("greet", &[("other", "x")]),
            "Hello, {name}!"
        );
    }

    // ==================== Signal Extraction Tests ====================

    #[test]
    fn test_query_lang_present() {
        let uri: Uri = "/posts?lang=ru&page=2".parse().expect("uri");
        assert_eq!(query_lang(&uri), Some("ru".to_string()));
    }

    #[test]
    fn test_query_lang_absent() {
        let uri: Uri = "/posts?page=2".parse().expect("uri");
        assert_eq!(query_lang(&uri), None);
        let bare: Uri = "/posts".parse().expect("uri");
        assert_eq!(query_lang(&bare), None);
    }

    // ==================== Cookie Tests ====================

    #[test]
    fn test_persistent_cookie_attributes() {
        let cookie = persistent_language_cookie("ru");
        assert_eq!(cookie.name(), LANG_COOKIE);
        assert_eq!(cookie.value(), "ru");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(COOKIE_MAX_AGE));
        // Must work over plain transport too.
        assert_ne!(cookie.secure(), Some(true));
    }
}
