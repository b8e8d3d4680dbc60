//! Standalone dev proxy binary.
//!
//! Listens on `TASKBOARD_PROXY_ADDR` and forwards `/api` to `TASKBOARD_PROXY_TARGET`
//! (default `http://backend:3500`, the backend's service name inside the compose network).

use dev_proxy::config::DEFAULT_PROXY_TARGET;
use dev_proxy::{router, ProxyConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dev_proxy=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ProxyConfig::from_env(DEFAULT_PROXY_TARGET)?;
    tracing::info!(
        "-- Starting dev proxy on {} -> {}",
        cfg.listen_addr(),
        cfg.target_origin()
    );

    let app = router(&cfg)?;
    let listener = tokio::net::TcpListener::bind(cfg.listen_addr()).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(api_shared::shutdown_signal())
        .await?;

    Ok(())
}
