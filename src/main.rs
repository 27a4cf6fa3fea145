use anyhow::{Context, Result};
use polyglot_web::{config::Config, i18n, web};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("polyglot_web=info".parse()?),
        )
        .init();

    info!("Starting polyglot-web");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Build the initial catalog; the default language must load or we stop here
    let catalog = i18n::load_catalog(
        Path::new(&config.locales_dir),
        &config.supported_languages,
        &config.default_language,
    )
    .context("failed to load translation catalogs")?;
    i18n::log_audit(&catalog);

    let addr = format!("0.0.0.0:{}", config.port);
    let state = web::AppState {
        config: Arc::new(config),
        catalog: i18n::SharedCatalog::new(catalog),
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, web::router(state)).await?;
    Ok(())
}
