//! HTTP server mode exposing the adapter to ingestion callers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapter::Adapter;
use crate::error::{Error, ErrorKind, Result};
use crate::http::PageFetcher;
use crate::request::PageRequest;

/// Shared server state
type AppState = Arc<Adapter<PageFetcher>>;

/// Build the adapter API router
pub fn router(adapter: AppState) -> Router {
    // allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/entities", get(list_entities))
        .route("/pages", post(get_page))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(adapter)
}

/// Start the HTTP server
pub async fn serve(adapter: AppState, port: u16) -> Result<()> {
    let app = router(adapter);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("adapter API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::internal(format!("failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::internal(format!("server error: {e}")))
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Read-only view of the entity registry
async fn list_entities(State(adapter): State<AppState>) -> impl IntoResponse {
    let entities: Vec<_> = adapter.registry().iter().collect();
    Json(json!({ "entities": entities }))
}

/// Fetch one normalized page for the posted request
async fn get_page(State(adapter): State<AppState>, Json(request): Json<PageRequest>) -> Response {
    match adapter.get_page(&request).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(error) => error_response(&error),
    }
}

/// Map an adapter error onto the wire: the kind picks the HTTP status, and
/// datasource failures carry the upstream status and retry-after through
fn error_response(error: &Error) -> Response {
    let status = match error.kind() {
        ErrorKind::InvalidDatasourceConfig
        | ErrorKind::InvalidEntityConfig
        | ErrorKind::InvalidPageRequestConfig => StatusCode::BAD_REQUEST,
        ErrorKind::DatasourceFailed => StatusCode::BAD_GATEWAY,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let mut body = json!({
        "kind": error.kind(),
        "message": error.to_string(),
    });
    if let Some(upstream) = error.status() {
        body["status"] = json!(upstream);
    }
    if let Some(retry_after) = error.retry_after() {
        body["retry_after"] = json!(retry_after);
    }

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_kinds_map_to_statuses() {
        let response = error_response(&Error::invalid_entity_config("bad entity"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = error_response(&Error::http_status(429, Some("60".to_string())));
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = error_response(&Error::internal("bad body"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
