mod app;
mod error;
mod routes;
mod settings;
mod state;


use std::sync::Arc;

use pvpc_sdk::config::PVPC_INDICATOR_ID;
use pvpc_sdk::PvpcClient;
use tracing_subscriber::EnvFilter;

use settings::Settings;
use state::AppState;

const DEFAULT_LOG_FILTER: &str = "pvpc_sdk=info,pvpc_api=info,tower_http=info";

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let settings = Settings::from_env();
    let client = match PvpcClient::new(settings.client.clone()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize PVPC client");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState {
        client,
        challenge_file: settings.challenge_file.clone(),
    });
    let app = app::router(state);

    let addr = settings.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(
        %addr,
        indicator = PVPC_INDICATOR_ID,
        api_key = if settings.client.has_api_key() { "configured" } else { "not configured (anonymous limits)" },
        summary_fetch = settings.client.summary_fetch.as_str(),
        "PVPC API listening"
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
