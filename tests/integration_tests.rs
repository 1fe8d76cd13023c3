//! End-to-end tests for the page-fetch protocol
//!
//! Drives the real fetcher and normalizer against the in-process sample
//! datasource and against wiremock upstreams, and exercises the adapter API
//! server over HTTP.

use pagegate::adapter::{Adapter, PageClient};
use pagegate::auth::Credential;
use pagegate::cli;
use pagegate::error::ErrorKind;
use pagegate::http::PageFetcher;
use pagegate::normalize::normalize_page;
use pagegate::registry::{EntityDescriptor, EntityRegistry};
use pagegate::request::PageRequest;
use pagegate::sample::{self, RECORDS_PER_ENTITY};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Spawn the sample datasource on an ephemeral port, returning its base URL
async fn spawn_sample_source(registry: Arc<EntityRegistry>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = sample::router(registry);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Spawn the adapter API on an ephemeral port, returning its base URL
async fn spawn_adapter_api() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let adapter = Adapter::new(EntityRegistry::builtin(), PageFetcher::new());
    let app = cli::router(Arc::new(adapter));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Walk every page of an entity, returning (pages, ids in arrival order)
async fn sweep(base: &str, entity: &str, page_size: u32) -> (usize, Vec<String>) {
    let fetcher = PageFetcher::new();
    let registry = EntityRegistry::builtin();
    let mut request = PageRequest::new(base, entity, page_size)
        .with_credential(Credential::token("Bearer test"));

    let mut pages = 0;
    let mut ids = Vec::new();
    loop {
        let raw = fetcher.fetch_page(&registry, &request).await.unwrap();
        assert!(raw.is_success(), "unexpected status {}", raw.status);

        let page = normalize_page(&registry, &raw.body, page_size).unwrap();
        pages += 1;
        ids.extend(
            page.records
                .iter()
                .map(|r| r["id"].as_str().unwrap().to_string()),
        );

        match page.next_cursor {
            Some(cursor) => request.cursor = cursor,
            None => break,
        }
    }
    (pages, ids)
}

#[tokio::test]
async fn test_pagination_sweep_exact_pages() {
    let base = spawn_sample_source(EntityRegistry::builtin()).await;
    let page_size = 100;

    let (pages, ids) = sweep(&base, "User", page_size).await;

    // ceil(1000 / 100) pages
    assert_eq!(pages, RECORDS_PER_ENTITY.div_ceil(page_size as usize));

    // the in-order union is the full record set: no gaps, no duplicates
    let expected: Vec<String> = (1..=RECORDS_PER_ENTITY).map(|i| i.to_string()).collect();
    assert_eq!(ids, expected);
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), RECORDS_PER_ENTITY);
}

#[tokio::test]
async fn test_pagination_sweep_with_remainder() {
    let base = spawn_sample_source(EntityRegistry::builtin()).await;
    let page_size = 64;

    let (pages, ids) = sweep(&base, "Group", page_size).await;

    assert_eq!(pages, RECORDS_PER_ENTITY.div_ceil(page_size as usize));
    let expected: Vec<String> = (1..=RECORDS_PER_ENTITY).map(|i| i.to_string()).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_sample_source_requires_authorization() {
    let base = spawn_sample_source(EntityRegistry::builtin()).await;
    let fetcher = PageFetcher::new();
    let registry = EntityRegistry::builtin();

    // no credential: the sample source answers 401, which passes through
    // as data for the caller to classify
    let raw = fetcher
        .fetch_page(&registry, &PageRequest::new(&base, "User", 10))
        .await
        .unwrap();

    assert_eq!(raw.status, 401);
    assert!(raw.body.is_empty());
}

#[tokio::test]
async fn test_sample_source_unknown_endpoint_is_404() {
    // a registry with an entity the sample source has no data for
    let registry = Arc::new(
        EntityRegistry::new(vec![
            EntityDescriptor::new("User", "users", "id"),
            EntityDescriptor::new("Widget", "widgets", "id"),
        ])
        .unwrap(),
    );
    let base = spawn_sample_source(Arc::clone(&registry)).await;

    let fetcher = PageFetcher::new();
    let raw = fetcher
        .fetch_page(
            &registry,
            &PageRequest::new(&base, "Widget", 10)
                .with_credential(Credential::token("Bearer test")),
        )
        .await
        .unwrap();

    assert_eq!(raw.status, 404);
}

#[tokio::test]
async fn test_sample_source_rejects_bad_cursor() {
    let base = spawn_sample_source(EntityRegistry::builtin()).await;
    let fetcher = PageFetcher::new();
    let registry = EntityRegistry::builtin();

    let raw = fetcher
        .fetch_page(
            &registry,
            &PageRequest::new(&base, "User", 10)
                .with_cursor("not-a-number")
                .with_credential(Credential::token("Bearer test")),
        )
        .await
        .unwrap();

    assert_eq!(raw.status, 400);
}

#[tokio::test]
async fn test_sample_source_total_count() {
    let base = spawn_sample_source(EntityRegistry::builtin()).await;
    let fetcher = PageFetcher::new();
    let registry = EntityRegistry::builtin();

    let raw = fetcher
        .fetch_page(
            &registry,
            &PageRequest::new(&base, "User", 5)
                .with_total()
                .with_credential(Credential::token("Bearer test")),
        )
        .await
        .unwrap();

    let body: serde_json::Value = serde_json::from_slice(&raw.body).unwrap();
    assert_eq!(body["total"], serde_json::json!(RECORDS_PER_ENTITY));
}

#[tokio::test]
async fn test_objects_envelope_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "objects": [{"id": "1"}]
        })))
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::new();
    let registry = EntityRegistry::builtin();
    let raw = fetcher
        .fetch_page(
            &registry,
            &PageRequest::new(mock_server.uri(), "User", 10)
                .with_credential(Credential::token("Bearer test")),
        )
        .await
        .unwrap();

    let page = normalize_page(&registry, &raw.body, 10).unwrap();
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.next_cursor, None);
}

#[tokio::test]
async fn test_response_envelope_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": [{"id": "a"}, {"id": "b"}]
        })))
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::new();
    let registry = EntityRegistry::builtin();
    let raw = fetcher
        .fetch_page(
            &registry,
            &PageRequest::new(mock_server.uri(), "Group", 10)
                .with_credential(Credential::token("Bearer test")),
        )
        .await
        .unwrap();

    let page = normalize_page(&registry, &raw.body, 10).unwrap();
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.records[0]["id"], serde_json::json!("a"));
}

#[tokio::test]
async fn test_api_rejects_unknown_entity() {
    let api = spawn_adapter_api().await;
    let client = reqwest::Client::new();

    let request = PageRequest::new("https://sor.example.com", "Widget", 10)
        .with_credential(Credential::token("Bearer test"));

    let response = client
        .post(format!("{api}/pages"))
        .json(&request)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["kind"], serde_json::json!("invalid_entity_config"));
}

#[tokio::test]
async fn test_api_rejects_insecure_address() {
    let api = spawn_adapter_api().await;
    let client = reqwest::Client::new();

    let request = PageRequest::new("http://sor.example.com", "User", 10)
        .with_credential(Credential::token("Bearer test"));

    let response = client
        .post(format!("{api}/pages"))
        .json(&request)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["kind"], serde_json::json!("invalid_datasource_config"));
}

#[tokio::test]
async fn test_api_surfaces_datasource_failure() {
    let api = spawn_adapter_api().await;
    let client = reqwest::Client::new();

    // https to a port nothing listens on: validation passes, transport fails
    let request = PageRequest::new("https://127.0.0.1:1", "User", 10)
        .with_credential(Credential::token("Bearer test"));

    let response = client
        .post(format!("{api}/pages"))
        .json(&request)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 502);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["kind"], serde_json::json!("datasource_failed"));
}

#[tokio::test]
async fn test_api_page_size_message_carries_both_values() {
    let api = spawn_adapter_api().await;
    let client = reqwest::Client::new();

    let request = PageRequest::new("https://sor.example.com", "User", 101)
        .with_credential(Credential::token("Bearer test"));

    let response = client
        .post(format!("{api}/pages"))
        .json(&request)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["kind"], serde_json::json!("invalid_page_request_config"));
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("101"));
    assert!(message.contains("100"));
}

#[tokio::test]
async fn test_api_health_and_entities() {
    let api = spawn_adapter_api().await;
    let client = reqwest::Client::new();

    let health: serde_json::Value = client
        .get(format!("{api}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], serde_json::json!("ok"));

    let entities: serde_json::Value = client
        .get(format!("{api}/entities"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = entities["entities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["external_id"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["User", "Group"]);
}
