//! stagebook-web - server-rendered venue/artist/show booking directory
//!
//! Lists venues grouped by city, artist rosters, and a show board; create,
//! edit, and delete flows run through HTML forms with flash feedback.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use stagebook_common::config;
use stagebook_common::db::init_database;
use stagebook_web::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(
    name = "stagebook-web",
    version,
    about = "Venue/artist/show booking directory"
)]
struct Args {
    /// Data folder holding the database file
    #[arg(long, env = "STAGEBOOK_DATA")]
    data_folder: Option<String>,

    /// Bind address
    #[arg(long, env = "STAGEBOOK_BIND")]
    bind: Option<String>,

    /// Listen port
    #[arg(long, env = "STAGEBOOK_PORT")]
    port: Option<u16>,

    /// Append logs to this file instead of stdout
    #[arg(long, env = "STAGEBOOK_LOG_FILE")]
    log_file: Option<PathBuf>,
}

/// Initialize the tracing subscriber, optionally writing to a log file
fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let file_config = config::load_file_config().ok().flatten().unwrap_or_default();

    let log_file = args
        .log_file
        .clone()
        .or_else(|| file_config.log_file.as_ref().map(PathBuf::from));
    init_tracing(log_file.as_ref())?;

    // Log build identification immediately after tracing init
    info!(
        "Starting Stagebook (stagebook-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let data_folder = config::resolve_data_folder(args.data_folder.as_deref(), "STAGEBOOK_DATA");
    let db_path = config::database_path(&data_folder)?;
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool);
    let app = build_router(state);

    let bind = args
        .bind
        .or(file_config.bind)
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = args.port.or(file_config.port).unwrap_or(5000);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind, port)).await?;
    info!("stagebook-web listening on http://{}:{}", bind, port);
    info!("Health check: http://{}:{}/health", bind, port);

    axum::serve(listener, app).await?;

    Ok(())
}
