//! In-memory sample datasource
//!
//! A small HTTP upstream for local testing: serves generated `User` and
//! `Group` records with the entity-key envelope and `offset`/`limit`/`more`
//! pagination, behind the same endpoint paths the registry maps to. Run it
//! with `pagegate sample-server` and point `get-page` at it.

use crate::cursor;
use crate::error::{Error, Result};
use crate::registry::EntityRegistry;
use crate::types::Record;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use once_cell::sync::Lazy;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Number of records generated for each entity
pub const RECORDS_PER_ENTITY: usize = 1000;

/// Generated dataset, keyed by entity external id
static DATA: Lazy<HashMap<String, Vec<Record>>> = Lazy::new(|| {
    let created_at = Utc::now().to_rfc3339();
    let mut data = HashMap::new();

    let users = (1..=RECORDS_PER_ENTITY)
        .map(|i| {
            record(json!({
                "id": i.to_string(),
                "displayName": format!("User #{i}"),
                "email": format!("user{i}@example.com"),
                "createdAt": created_at,
            }))
        })
        .collect();
    data.insert("User".to_string(), users);

    let groups = (1..=RECORDS_PER_ENTITY)
        .map(|i| {
            record(json!({
                "id": i.to_string(),
                "displayName": format!("Group #{i}"),
                "createdAt": created_at,
            }))
        })
        .collect();
    data.insert("Group".to_string(), groups);

    data
});

fn record(value: serde_json::Value) -> Record {
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("sample records are objects"),
    }
}

/// Records for one entity, if it exists in the dataset
pub fn records_for(entity: &str) -> Option<&'static [Record]> {
    DATA.get(entity).map(Vec::as_slice)
}

/// Build the sample datasource router over a registry
pub fn router(registry: Arc<EntityRegistry>) -> Router {
    Router::new()
        .route("/:endpoint", get(serve_entity))
        .with_state(registry)
}

/// Run the sample datasource on the given port
pub async fn serve(registry: Arc<EntityRegistry>, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        Error::internal(format!("failed to bind sample datasource to port {port}: {e}"))
    })?;

    info!("sample datasource listening on http://{addr}");

    axum::serve(listener, router(registry))
        .await
        .map_err(|e| Error::internal(format!("sample datasource error: {e}")))
}

/// Serve one page of an entity's records
async fn serve_entity(
    State(registry): State<Arc<EntityRegistry>>,
    Path(endpoint): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !headers.contains_key(header::AUTHORIZATION) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "missing Authorization header"})),
        )
            .into_response();
    }

    let Some(descriptor) = registry.iter().find(|d| d.endpoint == endpoint) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("unknown endpoint: {endpoint}")})),
        )
            .into_response();
    };

    let Some(records) = records_for(&descriptor.external_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("no data for entity: {}", descriptor.external_id)})),
        )
            .into_response();
    };

    let offset = match cursor::parse_offset(params.get("offset").map_or("", String::as_str)) {
        Ok(offset) => offset as usize,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": e.to_string()})),
            )
                .into_response();
        }
    };

    let limit = params
        .get("limit")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(records.len());

    let (page, more) = slice_page(records, offset, limit);

    let mut body = json!({
        "offset": offset,
        "limit": limit,
        "more": more,
    });
    body[descriptor.external_id.as_str()] = json!(page);
    if params.get("total").map(String::as_str) == Some("true") {
        body["total"] = json!(records.len());
    }

    (StatusCode::OK, Json(body)).into_response()
}

/// Slice one page out of a record set; `more` reports whether records
/// remain past the page
fn slice_page(records: &[Record], offset: usize, limit: usize) -> (&[Record], bool) {
    if offset >= records.len() {
        return (&[], false);
    }
    let end = offset.saturating_add(limit).min(records.len());
    (&records[offset..end], end < records.len())
}
