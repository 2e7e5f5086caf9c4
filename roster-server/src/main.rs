//! # Roster Server
//!
//! Member directory service: a REST resource over an authoritative store
//! with a write-through full-text search index.
//!
//! ## Architecture
//!
//! The server is built on Axum and uses:
//! - PostgreSQL for persistent storage (or an in-memory store for local runs)
//! - An in-process inverted index for free-text search

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use roster_core::{
    index::InvertedMemberIndex,
    store::{InMemoryMemberStore, MemberStore, PostgresMemberStore},
    MemberService,
};
use roster_server::{create_app, AppState, Config};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "roster-server")]
#[command(about = "Member directory service with write-through full-text search")]
struct Cli {
    /// Server host
    #[arg(long, env = "ROSTER_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, env = "ROSTER_PORT", default_value_t = 8080)]
    port: u16,

    /// Postgres connection string; the in-memory store is used when unset
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Comma-separated list of allowed CORS origins (all origins when empty)
    #[arg(long, env = "ROSTER_CORS_ORIGINS", value_delimiter = ',')]
    cors_allowed_origins: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "roster_server=debug,roster_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config {
        host: cli.host,
        port: cli.port,
        database_url: cli.database_url,
        cors_allowed_origins: cli.cors_allowed_origins,
    };

    // Explicit wiring: store and index first, then the service, then the
    // HTTP layer holding the service handle.
    let store: Arc<dyn MemberStore> = match config.database_url.as_deref() {
        Some(url) => {
            let store = PostgresMemberStore::connect(url).await?;
            store.initialize_schema().await?;
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL is not set - members are kept in memory and lost on shutdown");
            Arc::new(InMemoryMemberStore::new())
        }
    };
    let index = Arc::new(InvertedMemberIndex::new());
    let service = Arc::new(MemberService::new(store, index));

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState {
        service,
        config: Arc::new(config),
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Starting roster server (HTTP) on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
