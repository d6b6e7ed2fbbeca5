//! HTTP surface: `POST /v1/mcp`.

use crate::mcp::{RequestEnvelope, ResponseEnvelope, MCP_PATH};
use crate::server::{FunctionRegistry, McpError};
use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use std::sync::Arc;
use tracing::warn;

/// Build the axum router around a function registry.
pub fn router(registry: Arc<FunctionRegistry>) -> Router {
    Router::new()
        .route(MCP_PATH, post(handle_mcp))
        .with_state(registry)
}

async fn handle_mcp(
    State(registry): State<Arc<FunctionRegistry>>,
    body: Bytes,
) -> Result<Json<ResponseEnvelope>, McpError> {
    let request = RequestEnvelope::from_json(&body).map_err(|msg| {
        warn!("Rejected MCP request: {}", msg);
        McpError::Validation(msg)
    })?;

    let response = registry.dispatch(request).await.map_err(|e| {
        warn!("MCP dispatch failed: {}", e);
        e
    })?;

    Ok(Json(response))
}
