use items_api::{init_tracing, router};
use items_core::{Config, DynamoStore, MemoryStore};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Config::from_env()?;

    let app = match config.table_name.as_deref() {
        Some(table) => {
            info!(table, "using DynamoDB item store");
            router(DynamoStore::new(table).await)
        }
        None => {
            warn!("TABLE_NAME not set, items are kept in memory only");
            router(MemoryStore::new())
        }
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}
