//! # Dev Proxy
//!
//! Development-time front door for taskboard.
//!
//! Every request whose path starts with `/api` is forwarded to the REST backend with its method,
//! path, query and body intact, and with `Host` and `Origin` rewritten to the backend's origin so
//! the backend sees a same-origin request. Anything else is served from an optional frontend
//! directory. There is no production role for this crate.

pub mod config;
mod forward;

pub use config::ProxyConfig;
pub use forward::{strip_hop_by_hop, MAX_BODY_BYTES};

use api_shared::{ErrorRes, API_PREFIX};
use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::Router;
use forward::Upstream;
use http_body_util::LengthLimitError;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub const BAD_GATEWAY_MESSAGE: &str = "Backend unavailable";

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("invalid proxy target '{0}': {1}")]
    InvalidTarget(String, String),
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("failed to read request body: {0}")]
    RequestBody(axum::Error),
    #[error("backend request failed: {0}")]
    Upstream(reqwest::Error),
}

#[derive(Clone)]
struct ProxyState {
    upstream: Upstream,
    frontend: Option<ServeDir>,
}

/// Build the proxy router for `cfg`.
///
/// # Errors
/// Fails if the target cannot be turned into header values or the HTTP client cannot be built.
pub fn router(cfg: &ProxyConfig) -> Result<Router, ProxyError> {
    let invalid = |e: axum::http::header::InvalidHeaderValue| {
        ProxyError::InvalidTarget(cfg.target().to_string(), e.to_string())
    };

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(ProxyError::Client)?;

    let origin = cfg.target_origin();
    let upstream = Upstream {
        client,
        host: HeaderValue::from_str(&cfg.target_authority()).map_err(invalid)?,
        origin_header: HeaderValue::from_str(&origin).map_err(invalid)?,
        origin,
    };

    let frontend = cfg.frontend_dir().map(|dir| {
        tracing::info!("Serving frontend from {}", dir.display());
        ServeDir::new(dir)
    });

    Ok(Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(ProxyState { upstream, frontend }))
}

async fn dispatch(State(state): State<ProxyState>, req: Request) -> Response {
    if req.uri().path().starts_with(API_PREFIX) {
        return match forward::forward(&state.upstream, req).await {
            Ok(response) => response,
            Err(ProxyError::RequestBody(e)) => {
                tracing::debug!("unreadable request body: {}", e);
                request_body_status(&e).into_response()
            }
            Err(e) => {
                tracing::error!("Proxy error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorRes::new(BAD_GATEWAY_MESSAGE)),
                )
                    .into_response()
            }
        };
    }

    match state.frontend {
        Some(dir) => match dir.oneshot(req).await {
            Ok(response) => response.map(axum::body::Body::new),
            Err(never) => match never {},
        },
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// 413 when the body ran past [`MAX_BODY_BYTES`], 400 for any other read failure (e.g. the
/// client going away mid-body).
fn request_body_status(e: &axum::Error) -> StatusCode {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(e);
    while let Some(err) = source {
        if err.is::<LengthLimitError>() {
            return StatusCode::PAYLOAD_TOO_LARGE;
        }
        source = err.source();
    }
    StatusCode::BAD_REQUEST
}
