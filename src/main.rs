use api_rest::config::{core_config_from_env, rest_addr_from_env};
use dev_proxy::ProxyConfig;
use taskboard_core::TaskService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the taskboard application
///
/// Starts the REST server and the dev proxy concurrently:
/// - REST server on port 3500 (configurable via TASKBOARD_REST_ADDR)
/// - Dev proxy on port 3000 (configurable via TASKBOARD_PROXY_ADDR), forwarding `/api` to the
///   REST server started here unless TASKBOARD_PROXY_TARGET says otherwise
///
/// # Environment Variables
/// - `TASKBOARD_REST_ADDR`: REST server address (default: "0.0.0.0:3500")
/// - `TASKBOARD_PROXY_ADDR`: proxy address (default: "0.0.0.0:3000")
/// - `TASKBOARD_PROXY_TARGET`: backend the proxy forwards to (default: this process's REST port)
/// - `TASKBOARD_FRONTEND_DIR`: static files the proxy serves for non-`/api` paths
/// - `TASK_DATA_DIR`, `TASKBOARD_STORE`, `TASKBOARD_ALLOWED_FIELDS`,
///   `TASKBOARD_UPDATE_RETURNS`, `TASKBOARD_MISSING_TASK`: task store and policies
///
/// Both servers stop on Ctrl-C or SIGTERM after draining in-flight requests.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("taskboard_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("dev_proxy=info".parse()?)
                .add_directive("taskboard_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = core_config_from_env()?;
    let task_service = TaskService::from_config(&cfg)?;

    let rest_listener = tokio::net::TcpListener::bind(rest_addr_from_env()).await?;
    let rest_port = rest_listener.local_addr()?.port();
    tracing::info!("++ Starting taskboard REST on {}", rest_listener.local_addr()?);

    let proxy_cfg = ProxyConfig::from_env(&format!("http://127.0.0.1:{rest_port}"))?;
    let proxy_listener = tokio::net::TcpListener::bind(proxy_cfg.listen_addr()).await?;
    tracing::info!(
        "++ Starting dev proxy on {} -> {}",
        proxy_listener.local_addr()?,
        proxy_cfg.target_origin()
    );

    let rest_app = api_rest::router(api_rest::AppState::new(task_service));
    let proxy_app = dev_proxy::router(&proxy_cfg)?;

    let rest_server = async {
        axum::serve(rest_listener, rest_app)
            .with_graceful_shutdown(api_shared::shutdown_signal())
            .await
    };
    let proxy_server = async {
        axum::serve(proxy_listener, proxy_app)
            .with_graceful_shutdown(api_shared::shutdown_signal())
            .await
    };

    tokio::try_join!(rest_server, proxy_server)?;

    Ok(())
}
