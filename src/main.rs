//! Comments REST service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ middleware (request id, trace, limits, headers, CORS)
//!                          │
//!                          ▼
//!                     handlers ── validate ──▶ 400
//!                          │
//!                          ▼
//!                     CommentStore (SQLite, blocking pool)
//!                          │
//!                          ▼
//!     ◀────────────── envelope {success, data} / {error, message}
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use comments_api::config::{self, loader::apply_port_override, ServiceConfig};
use comments_api::lifecycle::{wait_for_signal, Shutdown};
use comments_api::observability::{logging, metrics};
use comments_api::{CommentStore, HttpServer};

#[derive(Parser)]
#[command(name = "comments-api")]
#[command(about = "REST service for managing comments", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override storage.path (":memory:" for a volatile store).
    #[arg(short, long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => ServiceConfig::default(),
    };
    apply_port_override(&mut config, std::env::var("PORT").ok().as_deref());
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(database) = args.database {
        config.storage.path = database;
    }
    config::validation::validate_config(&config).map_err(config::ConfigError::Validation)?;

    logging::init(&config.observability.log_level);
    tracing::info!("comments-api v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        storage = %config.storage.path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let store = CommentStore::open(&config.storage)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            wait_for_signal().await;
            shutdown.trigger();
        }
    });

    HttpServer::new(config, store).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
