//! MCP server: envelope router and function registry.

pub mod error;
pub mod registry;
pub mod routes;

pub use error::McpError;
pub use registry::{FunctionRegistry, GetWeather, McpFunction};
pub use routes::router;

use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Bind `host:port` for the server.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))
}

/// Serve the protocol on an already-bound listener until `cancel` fires.
pub async fn serve(
    listener: TcpListener,
    registry: Arc<FunctionRegistry>,
    cancel: CancellationToken,
) -> Result<()> {
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!("MCP server listening on http://{}{}", addr, crate::mcp::MCP_PATH);
    let mut functions: Vec<String> = registry.names().iter().map(ToString::to_string).collect();
    functions.sort();
    info!("Registered functions: {}", functions.join(", "));

    axum::serve(listener, router(registry))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .context("MCP server failed")?;

    info!("MCP server stopped");
    Ok(())
}

/// Build the registry from `config` and serve on `listener`.
pub async fn run_server(
    config: &AppConfig,
    listener: TcpListener,
    cancel: CancellationToken,
) -> Result<()> {
    let registry = Arc::new(FunctionRegistry::from_config(config));
    serve(listener, registry, cancel).await
}
