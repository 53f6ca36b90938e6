#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use mealplan_api::app::build_app;
use mealplan_api::background::recommendation_log::RecommendationLogger;
use mealplan_api::config::{LogFormat, ServerConfig};
use mealplan_api::recommender::RecommendationService;
use mealplan_api::state::AppState;
use mealplan_api::store::memory::MemoryStore;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        log_queue_capacity: 64,
        log_workers: 1,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application over `store`, with one log worker.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let (logger, _handles) = RecommendationLogger::start(
        store.clone(),
        config.log_queue_capacity,
        config.log_workers,
        CancellationToken::new(),
    );
    let state = AppState {
        config: Arc::new(config),
        recommender: RecommendationService::new(store.clone(), store, logger),
    };
    build_app(state)
}

/// A small catalogue:
///
/// | id | name        | category    |
/// |----|-------------|-------------|
/// | 1  | Carbonara   | 1 Pasta     |
/// | 2  | Lasagne     | 1 Pasta     |
/// | 3  | Minestrone  | 2 Soup      |
/// | 4  | Tom Yum     | 2 Soup      |
/// | 5  | Fried Rice  | 3 Rice      |
/// | 6  | Toast       | (none)      |
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.add_category(1, "Pasta");
    store.add_category(2, "Soup");
    store.add_category(3, "Rice");
    store.add_recipe(1, "Carbonara", Some(1));
    store.add_recipe(2, "Lasagne", Some(1));
    store.add_recipe(3, "Minestrone", Some(2));
    store.add_recipe(4, "Tom Yum", Some(2));
    store.add_recipe(5, "Fried Rice", Some(3));
    store.add_recipe(6, "Toast", None);
    store
}

/// A bearer token as the gateway would forward it. The signature is never
/// checked by the service.
pub fn token_for(user_id: i64) -> String {
    encode(
        &Header::default(),
        &json!({ "user_id": user_id, "email": format!("user{user_id}@example.com") }),
        &EncodingKey::from_secret(b"gateway-secret"),
    )
    .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, user_id: i64) -> Response<Body> {
    let request = Request::get(uri)
        .header("authorization", format!("Bearer {}", token_for(user_id)))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_json_auth(
    app: Router,
    method: &str,
    uri: &str,
    user_id: i64,
    body: serde_json::Value,
) -> Response<Body> {
    send_raw_auth(app, method, uri, user_id, body.to_string()).await
}

pub async fn send_raw_auth(
    app: Router,
    method: &str,
    uri: &str,
    user_id: i64,
    body: String,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token_for(user_id)))
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Poll until the store holds at least `expected` log rows.
pub async fn wait_for_log_rows(store: &MemoryStore, expected: usize) {
    for _ in 0..100 {
        if store.recommendation_log().len() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "expected {expected} log rows, found {}",
        store.recommendation_log().len()
    );
}
