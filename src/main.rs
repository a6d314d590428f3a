use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use todo_stack::config::{ServerConfig, DEFAULT_PORT, DEFAULT_UPLOAD_DIR};
use todo_stack::server;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct ServerArgs {
    #[clap(short, long)]
    log_level: Option<String>,
    #[clap(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,
    #[clap(long, default_value = DEFAULT_UPLOAD_DIR)]
    upload_dir: PathBuf,
    /// Overrides the URL assembled from DB_HOST, DB_USER, DB_PASSWORD, DB_NAME and DB_PORT.
    #[clap(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    setup_logging(&args.log_level);

    info!("Starting todo server on port {}", args.port);
    let config = ServerConfig::new(args.port, args.upload_dir, args.database_url);
    server::start_server(config).await?;

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_deref()
        .unwrap_or("info")
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("sqlx=warn,{}", log_level)))
        .init();
}
