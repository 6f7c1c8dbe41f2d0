//! CodeSense - AI-assisted code review over HTTP
//!
//! Serves the review API and delegates the analysis itself to an external
//! process configured via file, environment, or command line.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use codesense_core::{Config, Secrets, SubprocessAnalyzer};
use codesense_db::Database;
use codesense_server::{AppState, http};

/// CodeSense: AI-assisted code review service
#[derive(Parser, Debug)]
#[command(name = "codesense")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0", env = "CODESENSE_HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8000, env = "CODESENSE_PORT")]
    port: u16,

    /// Path to the review database (defaults to the user cache directory)
    #[arg(long, env = "CODESENSE_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Command used to run the analysis script (overrides config and env)
    #[arg(long, env = "CODESENSE_ANALYZER_CMD")]
    analyzer_cmd: Option<String>,

    /// Path to the analysis script (overrides config and env)
    #[arg(long, env = "CODESENSE_ANALYZER_SCRIPT")]
    analyzer_script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = Config::load_with_overrides(cli.analyzer_cmd, cli.analyzer_script)?;
    let secrets = Secrets::load()?;

    let mut analyzer = SubprocessAnalyzer::from_config(&config.analyzer);
    if let Some(key) = secrets.api_key() {
        analyzer = analyzer.with_api_key(key);
    }

    let db_path = match cli.db_path {
        Some(path) => path,
        None => Database::default_path()?,
    };
    tracing::info!(
        command = %config.analyzer.command,
        script = %config.analyzer.script.display(),
        db = %db_path.display(),
        "configuration loaded"
    );

    let state = AppState::new(Arc::new(analyzer), db_path);

    let app = http::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("codesense listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
