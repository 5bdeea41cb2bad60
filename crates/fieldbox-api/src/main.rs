//! fieldbox-api binary: seed the stores, wire the Gemini backend, serve.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fieldbox_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fieldbox=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::from_env();
    info!(
        subsystem = "api",
        document_count = state.catalog.len(),
        account_count = state.accounts.len(),
        "fieldbox state initialized"
    );

    let bind = std::env::var("FIELDBOX_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(subsystem = "api", %bind, "fieldbox-api listening");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
