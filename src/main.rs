//! SmartThings scene panel server.

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use smartthings_scenes::web::CookieSettings;
use smartthings_scenes::{Config, MemorySessionStore, PlatformClient, app_router};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = Config::from_env().context("invalid configuration")?;
    let cookie_settings = CookieSettings::from_env().context("invalid cookie configuration")?;

    let port = config.port();
    info!(app_id = %config.app_id(), "starting scene panel");
    info!("Open:     {}", config.base_url());
    info!("Callback: {}", config.redirect_uri());

    let client = PlatformClient::new(config);
    let app = app_router(client, MemorySessionStore::new(), cookie_settings);

    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Initialize the logging subsystem.
///
/// The `RUST_LOG` environment variable overrides the default directives.
fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false);

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("smartthings_scenes=info,reqwest=warn"))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
