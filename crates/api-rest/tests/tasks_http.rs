mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{
    app_with_store, empty_request, json_request, memory_app, memory_config, raw_request, read_json,
};
use serde_json::json;
use std::sync::Arc;
use taskboard_core::store::files::FileTaskStore;
use taskboard_core::{
    CoreConfig, MissingTask, Replaced, StoreBackend, Task, TaskError, TaskFields, TaskId,
    TaskResult, TaskSchema, TaskStore, UpdateResponse,
};
use tower::ServiceExt;

const UNKNOWN_ID: &str = "0123456789abcdef0123456789abcdef";

#[tokio::test]
async fn crud_round_trip() {
    let app = memory_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/tasks", json!({"title": "buy milk"})))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::OK);
    let created = read_json(response).await;
    assert_eq!(created["title"], "buy milk");
    let id = created["_id"].as_str().expect("_id").to_string();
    assert!(TaskId::parse(&id).is_ok());

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/tasks"))
        .await
        .expect("list");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!([created.clone()]));

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/tasks/{id}"),
            json!({"title": "buy oat milk"}),
        ))
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, created);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/tasks"))
        .await
        .expect("list");
    assert_eq!(
        read_json(response).await,
        json!([{"_id": id, "title": "buy oat milk"}])
    );

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/tasks/{id}")))
        .await
        .expect("delete");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({"_id": id, "title": "buy oat milk"})
    );

    let response = app
        .oneshot(empty_request("GET", "/api/tasks"))
        .await
        .expect("list");
    assert_eq!(read_json(response).await, json!([]));
}

#[tokio::test]
async fn list_returns_every_task_in_creation_order() {
    let app = memory_app();

    let mut ids = Vec::new();
    for n in 0..5 {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/tasks/", json!({"n": n})))
            .await
            .expect("create");
        ids.push(read_json(response).await["_id"].clone());
    }

    let response = app
        .oneshot(empty_request("GET", "/api/tasks/"))
        .await
        .expect("list");
    let listed = read_json(response).await;
    let listed = listed.as_array().expect("array");
    assert_eq!(listed.len(), 5);
    let listed_ids: Vec<_> = listed.iter().map(|t| t["_id"].clone()).collect();
    assert_eq!(listed_ids, ids);
}

#[tokio::test]
async fn empty_body_creates_task_with_only_id() {
    let app = memory_app();

    let response = app
        .oneshot(empty_request("POST", "/api/tasks"))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::OK);
    let created = read_json(response).await;
    let object = created.as_object().expect("object");
    assert_eq!(object.len(), 1);
    assert!(object.contains_key("_id"));
}

#[tokio::test]
async fn missing_task_yields_null_by_default() {
    let app = memory_app();

    for method in ["PUT", "DELETE"] {
        let uri = format!("/api/tasks/{UNKNOWN_ID}");
        let response = app
            .clone()
            .oneshot(json_request(method, &uri, json!({"title": "x"})))
            .await
            .expect("request");
        assert_eq!(response.status(), StatusCode::OK, "{method} {uri}");
        assert_eq!(read_json(response).await, serde_json::Value::Null);
    }
}

#[tokio::test]
async fn malformed_id_fails_with_operation_message() {
    let app = memory_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/tasks", json!({"title": "keep"})))
        .await
        .expect("create");
    let kept = read_json(response).await;

    for id in ["not-an-id", "65f1c2a9e4b0a1b2c3d4e5f6"] {
        for (method, expected) in [
            ("PUT", "Could not update task"),
            ("DELETE", "Could not delete task"),
        ] {
            let response = app
                .clone()
                .oneshot(json_request(
                    method,
                    &format!("/api/tasks/{id}"),
                    json!({"title": "x"}),
                ))
                .await
                .expect("request");
            assert_eq!(
                response.status(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "{method} {id}"
            );
            assert_eq!(read_json(response).await, json!({"error": expected}));
        }
    }

    let response = app
        .oneshot(empty_request("GET", "/api/tasks"))
        .await
        .expect("list");
    assert_eq!(read_json(response).await, json!([kept]));
}

#[tokio::test]
async fn missing_task_yields_404_when_configured() {
    let cfg = memory_config().with_missing_task(MissingTask::NotFound);
    let app = app_with_store(
        Arc::new(taskboard_core::store::memory::InMemoryTaskStore::new()),
        &cfg,
    );

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/tasks/{UNKNOWN_ID}")))
        .await
        .expect("delete");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await, json!({"error": "Task not found"}));

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/tasks/{UNKNOWN_ID}"),
            json!({}),
        ))
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_can_return_current_document() {
    let cfg = memory_config().with_update_response(UpdateResponse::Current);
    let app = app_with_store(
        Arc::new(taskboard_core::store::memory::InMemoryTaskStore::new()),
        &cfg,
    );

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/tasks", json!({"title": "a"})))
        .await
        .expect("create");
    let id = read_json(response).await["_id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/tasks/{id}"),
            json!({"title": "b", "done": true}),
        ))
        .await
        .expect("update");
    assert_eq!(
        read_json(response).await,
        json!({"_id": id, "title": "b", "done": true})
    );
}

#[tokio::test]
async fn rejects_bad_bodies_with_400() {
    let app = memory_app();

    let response = app
        .clone()
        .oneshot(raw_request("POST", "/api/tasks", "{not json"))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({"error": "Request body must be a JSON object"})
    );

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/tasks", json!(["a", "b"])))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/tasks",
            json!({"_id": UNKNOWN_ID, "title": "x"}),
        ))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("_id"));

    let response = app
        .oneshot(empty_request("GET", "/api/tasks"))
        .await
        .expect("list");
    assert_eq!(read_json(response).await, json!([]));
}

#[tokio::test]
async fn allowed_fields_are_enforced() {
    let cfg = memory_config().with_schema(TaskSchema::allowing(["title", "done"]).unwrap());
    let app = app_with_store(
        Arc::new(taskboard_core::store::memory::InMemoryTaskStore::new()),
        &cfg,
    );

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/tasks", json!({"title": "ok"})))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::OK);
    let id = read_json(response).await["_id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/tasks",
            json!({"title": "x", "owner": "sam"}),
        ))
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("owner"));

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/tasks/{id}"),
            json!({"colour": "red"}),
        ))
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

struct FailingStore;

#[async_trait]
impl TaskStore for FailingStore {
    async fn create(&self, _fields: TaskFields) -> TaskResult<Task> {
        Err(TaskError::StoreUnavailable("disk on fire".into()))
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        Err(TaskError::StoreUnavailable("disk on fire".into()))
    }

    async fn replace(&self, _id: &TaskId, _fields: TaskFields) -> TaskResult<Option<Replaced>> {
        Err(TaskError::StoreUnavailable("disk on fire".into()))
    }

    async fn delete(&self, _id: &TaskId) -> TaskResult<Option<Task>> {
        Err(TaskError::StoreUnavailable("disk on fire".into()))
    }

    async fn health_check(&self) -> TaskResult<()> {
        Err(TaskError::StoreUnavailable("disk on fire".into()))
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

#[tokio::test]
async fn store_failures_map_to_fixed_500_messages() {
    let app = app_with_store(Arc::new(FailingStore), &memory_config());
    let item = format!("/api/tasks/{UNKNOWN_ID}");

    for (method, uri, expected) in [
        ("POST", "/api/tasks", "Could not create task"),
        ("GET", "/api/tasks", "Could not fetch tasks"),
        ("PUT", item.as_str(), "Could not update task"),
        ("DELETE", item.as_str(), "Could not delete task"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(method, uri, json!({"title": "x"})))
            .await
            .expect("request");
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "{method} {uri}"
        );
        let body = read_json(response).await;
        assert_eq!(body, json!({"error": expected}));
        assert!(!body.to_string().contains("disk on fire"));
    }
}

#[tokio::test]
async fn health_reports_store_state() {
    let response = memory_app()
        .oneshot(empty_request("GET", "/health"))
        .await
        .expect("health");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["ok"], true);

    let response = app_with_store(Arc::new(FailingStore), &memory_config())
        .oneshot(empty_request("GET", "/health"))
        .await
        .expect("health");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(read_json(response).await["ok"], false);
}

#[tokio::test]
async fn file_store_persists_across_routers() {
    let temp = tempfile::TempDir::new().expect("tempdir");
    let cfg = CoreConfig::new(temp.path().to_path_buf(), StoreBackend::Files);

    let app = app_with_store(
        Arc::new(FileTaskStore::open(cfg.tasks_dir()).expect("open")),
        &cfg,
    );
    let response = app
        .oneshot(json_request("POST", "/api/tasks", json!({"title": "durable"})))
        .await
        .expect("create");
    let created = read_json(response).await;

    let reopened = app_with_store(
        Arc::new(FileTaskStore::open(cfg.tasks_dir()).expect("reopen")),
        &cfg,
    );
    let response = reopened
        .oneshot(empty_request("GET", "/api/tasks"))
        .await
        .expect("list");
    assert_eq!(read_json(response).await, json!([created]));
}

#[tokio::test]
async fn serves_openapi_document() {
    let response = memory_app()
        .oneshot(empty_request("GET", "/api-docs/openapi.json"))
        .await
        .expect("openapi");
    assert_eq!(response.status(), StatusCode::OK);
    let doc = read_json(response).await;
    assert!(doc["paths"]["/api/tasks"].is_object());
    assert!(doc["paths"]["/api/tasks/{id}"].is_object());
}
