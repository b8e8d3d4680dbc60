#![allow(dead_code)]

use api_rest::{router, AppState};
use axum::body::Body;
use axum::http::Request;
use std::sync::Arc;
use taskboard_core::store::memory::InMemoryTaskStore;
use taskboard_core::{CoreConfig, StoreBackend, TaskService, TaskStore};

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    raw_request(method, uri, body.to_string())
}

pub fn raw_request(method: &str, uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .expect("request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

/// Router over an in-memory store with the default policies.
pub fn memory_app() -> axum::Router {
    app_with_store(Arc::new(InMemoryTaskStore::new()), &memory_config())
}

pub fn memory_config() -> CoreConfig {
    CoreConfig::new("unused".into(), StoreBackend::Memory)
}

pub fn app_with_store(store: Arc<dyn TaskStore>, cfg: &CoreConfig) -> axum::Router {
    router(AppState::new(TaskService::with_store(store, cfg)))
}
