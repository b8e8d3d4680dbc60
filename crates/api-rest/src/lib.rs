//! # API REST
//!
//! REST API implementation for taskboard.
//!
//! Handles:
//! - HTTP endpoints with axum (`/api/tasks`, `/health`)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, error-to-status mapping, CORS, request tracing)
//!
//! Task logic and persistence come from `taskboard-core`; wire types from `api-shared`.

#![warn(rust_2018_idioms)]

pub mod config;
mod tasks;

use api_shared::{ErrorRes, HealthRes, TaskDoc, TaskFieldsReq, TASKS_PATH};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use taskboard_core::TaskService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::core_config_from_env;

/// Application state shared across REST API handlers.
///
/// Holds the task service, constructed once at startup and injected here; handlers keep no
/// state of their own between requests.
#[derive(Clone)]
pub struct AppState {
    pub task_service: TaskService,
}

impl AppState {
    pub fn new(task_service: TaskService) -> Self {
        Self { task_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        tasks::create_task,
        tasks::list_tasks,
        tasks::update_task,
        tasks::delete_task,
    ),
    components(schemas(HealthRes, ErrorRes, TaskDoc, TaskFieldsReq))
)]
pub struct ApiDoc;

/// Build the REST router.
///
/// Task routes are mounted under `/api/tasks`, both with and without a trailing slash on the
/// collection path.
pub fn router(state: AppState) -> Router {
    let collection = get(tasks::list_tasks).post(tasks::create_task);

    Router::new()
        .route("/health", get(health))
        .route(TASKS_PATH, collection.clone())
        .route(&format!("{TASKS_PATH}/"), collection)
        .route(
            &format!("{TASKS_PATH}/:id"),
            put(tasks::update_task).delete(tasks::delete_task),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes),
        (status = 503, description = "Task store unavailable", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Reports whether the process is up and the task store is reachable.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthRes>) {
    let res = api_shared::HealthService::check_with(state.task_service.health_check().await);
    let status = if res.ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(res))
}
