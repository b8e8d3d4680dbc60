//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the task REST API on its own.
//!
//! ## Intended use
//! This is the backend tier of the dev setup: the dev proxy forwards `/api` requests here. The
//! workspace's main `taskboard-run` binary runs this server and the proxy together.

use api_rest::config::{core_config_from_env, rest_addr_from_env};
use api_rest::{router, AppState};
use taskboard_core::TaskService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("taskboard_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = rest_addr_from_env();
    tracing::info!("-- Starting taskboard REST API on {}", addr);

    let cfg = core_config_from_env()?;
    let task_service = TaskService::from_config(&cfg)?;
    let app = router(AppState::new(task_service));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(api_shared::shutdown_signal())
        .await?;

    Ok(())
}
