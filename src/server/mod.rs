pub mod app;
pub mod extract;
pub mod handlers;

use anyhow::Result;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::database::{connect_or_exit, setup_database, RetryPolicy};
use crate::services::FileStore;

pub async fn start_server(config: ServerConfig) -> Result<()> {
    let db = connect_or_exit(&config.database_url, &RetryPolicy::default()).await;
    setup_database(&db).await?;

    let files = FileStore::new(&config.upload_dir);
    files.ensure_dir().await?;

    let app = app::create_app(app::AppState::with_database(db, files));

    log_routes();

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server starting on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

fn log_routes() {
    info!("API Endpoints:");
    info!("  GET    /health                     - Health check");
    info!("  POST   /todos                      - Create todo");
    info!("  GET    /todos                      - List todos");
    info!("  GET    /todos/{{uuid}}               - Fetch todo");
    info!("  PUT    /todos/{{uuid}}               - Set completion");
    info!("  DELETE /todos/{{uuid}}               - Delete todo");
    info!("  POST   /files/upload               - Upload file (multipart field `file`)");
    info!("  GET    /files/list                 - List uploaded files");
    info!("  GET    /files/download/{{filename}}  - Download file");
    info!("  DELETE /files/{{filename}}           - Delete file");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                error!("Failed to install signal handler: {}", err);
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
}
