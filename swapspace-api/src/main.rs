//! # SwapSpace API Server
//!
//! Serves the item catalog, accounts and sessions of the SwapSpace barter
//! marketplace over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! SESSION_SECRET=$(openssl rand -hex 32) cargo run -p swapspace-api
//! ```

use swapspace_api::{
    app::{build_router, AppState},
    config::Config,
    stores::Stores,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "swapspace_api=debug,swapspace_shared=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is read before tracing so LOG_FORMAT and RUST_LOG can live there
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!(
        "SwapSpace API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let stores = Stores::open(&config).await?;

    let address = config.bind_address();
    let state = AppState::new(stores.items.clone(), stores.users.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    stores.close().await;
    tracing::info!("Server stopped");

    Ok(())
}
