use std::net::SocketAddr;

use anyhow::Context;
use chat_relay::{
    config::Config,
    routes,
    services::gemini::GeminiClient,
    state::AppState,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chat_relay=info,tower_http=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let client = GeminiClient::new(&config).context("failed to build upstream HTTP client")?;
    info!(model = %config.model, endpoint = client.endpoint(), "upstream model configured");

    let state = AppState::shared(client);

    let app = routes::create_router().with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("chat relay listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
