//! Entry point for the public people API service.

use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use people_core::PeopleDriver;
use people_graph::{CypherDriver, GraphClient};

use people_api::config::{ApiConfig, Backend};
use people_api::{router, AppState, ConceptsDriver, ServiceInfo};

#[derive(Parser)]
#[command(name = "people-api")]
#[command(about = "Read-only API serving Person documents from the knowledge graph")]
struct Cli {
    /// Config file prefix (default: people).
    #[arg(short, long, default_value = "people")]
    config: String,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the deployment environment (e.g. `test`, `prod`).
    #[arg(long)]
    env: Option<String>,

    /// Override the read backend.
    #[arg(long, value_enum)]
    backend: Option<Backend>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut api_config = ApiConfig::load(&cli.config).context("failed to load configuration")?;
    if let Some(port) = cli.port {
        api_config.port = port;
    }
    if let Some(env) = cli.env {
        api_config.env = env;
    }
    if let Some(backend) = cli.backend {
        api_config.backend = backend;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&api_config.log_level));
    fmt().with_env_filter(filter).json().init();

    let driver = build_driver(&api_config).await?;

    let state = AppState {
        driver,
        cache_max_age: api_config.cache_max_age(),
        service: Arc::new(ServiceInfo {
            system_code: api_config.app_system_code.clone(),
            name: api_config.app_name.clone(),
            description: "Provides a public API for People stored in the knowledge graph"
                .to_string(),
        }),
    };
    let app = router(state, api_config.request_logging_enabled);

    let address = format!("0.0.0.0:{}", api_config.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(
        address = %address,
        backend = ?api_config.backend,
        env = %api_config.env,
        "Public People API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Public People API stopped");
    Ok(())
}

async fn build_driver(api_config: &ApiConfig) -> anyhow::Result<Arc<dyn PeopleDriver>> {
    match api_config.backend {
        Backend::Neo4j => {
            let graph = GraphClient::connect(&api_config.graph_config())
                .await
                .context("failed to connect to Neo4j")?;
            Ok(Arc::new(CypherDriver::new(
                graph,
                api_config.env.clone(),
                api_config.health_check_timeout(),
            )))
        }
        Backend::Concepts => {
            let driver = ConceptsDriver::new(
                api_config.concepts_api_url.clone(),
                api_config.env.clone(),
                api_config.upstream_timeout(),
                api_config.health_check_timeout(),
            )
            .context("failed to build concepts API client")?;
            tracing::info!(url = %api_config.concepts_api_url, "Reading people from the concepts API");
            Ok(Arc::new(driver))
        }
    }
}

/// Resolves on ctrl-c, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
