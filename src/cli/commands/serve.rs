//! HTTP API server command.

use crate::cli::Output;
use crate::config::{ApiKeys, Settings};
use crate::pipeline::Pipeline;
use crate::server::{router, AppState, ROUTES};
use std::sync::Arc;
use tracing::info;

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
    keys: &ApiKeys,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let pipeline = Pipeline::new(settings, keys)?;
    let app = router(Arc::new(AppState { pipeline }));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    Output::section("vidbrief API Server");
    Output::success(&format!("Listening on http://{}", addr));
    Output::section("Endpoints");
    Output::routes(ROUTES);
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
