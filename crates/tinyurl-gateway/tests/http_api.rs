use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use std::sync::Arc;
use tinyurl_cache::MokaCache;
use tinyurl_core::{Store, StoreError, UrlDocument, UrlKey};
use tinyurl_gateway::{App, AppState};
use tinyurl_generator::SeqGenerator;
use tinyurl_service::{MetricsUsageCounter, UrlService};
use tinyurl_storage::InMemoryStore;
use tower::ServiceExt;

const BASE_URL: &str = "https://tiny.io";

fn app_with_store<S: Store>(store: S) -> Router {
    let service = UrlService::new(
        store,
        MokaCache::new(),
        SeqGenerator::new(),
        MetricsUsageCounter::new(),
    );
    App::router(AppState::new(Arc::new(service), BASE_URL))
}

fn app() -> Router {
    app_with_store(InMemoryStore::new())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, request).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn create(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v0/tinyurlsvc")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create_url(app: &Router, url: &str, live_forever: bool) -> Value {
    let body = json!({ "url": url, "liveForever": live_forever }).to_string();
    let (status, value) = send_json(app, create(&body)).await;
    assert_eq!(status, StatusCode::CREATED, "{value}");
    value
}

#[tokio::test]
async fn health() {
    let (status, body) = send_json(&app(), get("/healthy")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn create_returns_short_url() {
    let app = app();

    let body = create_url(&app, "https://abc.io", false).await;

    assert_eq!(body["urlKey"], "1");
    assert_eq!(body["generatedTinyUrl"], "https://tiny.io/tinyurlsvc/1");
    assert_eq!(body["liveForever"], false);
    assert!(body["expireTime"].as_str().unwrap().parse::<jiff::Timestamp>().is_ok());
}

#[tokio::test]
async fn create_rejects_invalid_url() {
    let (status, body) = send_json(&app(), create(r#"{"url":"ftp://abc.io"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 101);
}

#[tokio::test]
async fn create_rejects_malformed_body() {
    let (status, body) = send_json(&app(), create("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 100);
}

#[tokio::test]
async fn get_returns_document() {
    let app = app();
    create_url(&app, "https://abc.io/path?q=1", true).await;

    let (status, body) = send_json(&app, get("/api/v0/tinyurlsvc/1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base10Id"], 0);
    assert_eq!(body["urlKey"], "1");
    assert_eq!(body["longUrl"], "https://abc.io/path?q=1");
    assert_eq!(body["liveForever"], true);
}

#[tokio::test]
async fn redirect_is_permanent() {
    let app = app();
    create_url(&app, "https://abc.io/landing", false).await;

    let (status, headers, _) = send(&app, get("/tinyurlsvc/1")).await;

    assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(headers[header::LOCATION], "https://abc.io/landing");
}

#[tokio::test]
async fn unknown_key_is_not_found() {
    let app = app();

    let (status, body) = send_json(&app, get("/api/v0/tinyurlsvc/JV5pY")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 103);

    let (status, _, _) = send(&app, get("/tinyurlsvc/JV5pY")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_key_is_rejected() {
    let (status, body) = send_json(&app(), get("/api/v0/tinyurlsvc/0OIl")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 101);
}

#[tokio::test]
async fn delete_then_delete_again() {
    let app = app();
    create_url(&app, "https://abc.io", false).await;

    let (status, _) = send_json(&app, delete("/api/v0/tinyurlsvc/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json(&app, delete("/api/v0/tinyurlsvc/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 103);

    let (status, _) = send_json(&app, get("/api/v0/tinyurlsvc/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route() {
    let (status, body) = send_json(&app(), get("/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 102);
}

#[tokio::test]
async fn metrics_disabled_by_default() {
    let (status, body) = send_json(&app(), get("/metrics")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 102);
}

#[tokio::test]
async fn metrics_exposed_when_enabled() {
    let service = UrlService::new(
        InMemoryStore::new(),
        MokaCache::new(),
        SeqGenerator::new(),
        MetricsUsageCounter::new(),
    );
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let app = App::router(AppState::new(Arc::new(service), BASE_URL).with_metrics(handle));

    let (status, headers, _) = send(&app, get("/metrics")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

struct BrokenStore;

#[async_trait]
impl Store for BrokenStore {
    async fn put(&self, _document: &UrlDocument) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get_document(&self, _key: &UrlKey) -> Result<UrlDocument, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _key: &UrlKey) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let app = app_with_store(BrokenStore);

    let (status, body) = send_json(&app, create(r#"{"url":"https://abc.io"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 99);

    let (status, body) = send_json(&app, get("/api/v0/tinyurlsvc/JV5pY")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 99);
}
