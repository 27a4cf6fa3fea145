//! HTTP surface: router assembly and the handful of routes the localization
//! subsystem owns. Everything else a real site would serve mounts in front of
//! the same [`language::language_middleware`] layer and reads the
//! [`language::Translator`] extension.

pub mod language;

use crate::config::Config;
use crate::i18n::{LookupMetrics, MetricsReport, SharedCatalog};
use axum::{
    extract::{Extension, State},
    middleware,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use self::language::Translator;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state: immutable config plus the swappable catalog.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: SharedCatalog,
}

/// Assemble the service router.
///
/// Routes added before the language layer are bound per request; the
/// change/reload/metrics/health endpoints sit outside it.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            language::language_middleware,
        ))
        .route("/language", get(language::set_language))
        .route("/i18n/reload", post(language::reload_catalog))
        .route("/i18n/metrics", get(lookup_metrics))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Minimal translated landing page; stands in for the site's real pages.
async fn home(
    State(state): State<AppState>,
    Extension(translator): Extension<Translator>,
) -> Html<String> {
    let title = translator.t("site.title");
    let welcome = translator.t_with("home.welcome", &[("site", &title)]);
    let switcher = state
        .config
        .supported_languages
        .iter()
        .map(|code| format!("<a href=\"/language?lang={code}\">{code}</a>"))
        .collect::<Vec<_>>()
        .join(" | ");
    Html(format!(
        "<!doctype html>\n<html lang=\"{lang}\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n<h1>{welcome}</h1>\n<p>{tagline}</p>\n<p>{switcher}</p>\n</body>\n</html>\n",
        lang = translator.language(),
        title = title,
        welcome = welcome,
        tagline = translator.t("home.tagline"),
        switcher = switcher,
    ))
}

async fn lookup_metrics() -> Json<MetricsReport> {
    Json(LookupMetrics::global().report())
}

async fn health() -> &'static str {
    "OK"
}
