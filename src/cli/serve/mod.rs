//! Serve command - runs the HTTP API over the configured product store

use std::net::SocketAddr;

use anyhow::Context;
use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::create_router;
use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::ProductStore;

/// Flags override the loaded configuration
#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long)]
    pub port: Option<u16>,

    /// Storage backend (`memory` or `postgres`)
    #[arg(long)]
    pub storage: Option<String>,
}

impl ServeArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }

        if let Some(port) = self.port {
            config.server.port = port;
        }

        if let Some(storage) = &self.storage {
            config.storage.backend = storage.clone();
        }
    }
}

/// Run the server until Ctrl+C or SIGTERM
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    args.apply(&mut config);

    logging::init_logging(&config.logging)?;

    let store = crate::open_store(&config).await?;
    let result = serve(&config, &store).await;

    // Release the store even when serving failed
    store.close().await;
    info!("Server shutdown complete");

    result
}

async fn serve(config: &AppConfig, store: &ProductStore) -> anyhow::Result<()> {
    let app = create_router(crate::create_app_state(store));

    let addr = build_socket_addr(config)?;
    info!("Starting product catalog on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
