use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use inventory_service::{
    api::{create_router, middleware::error_handling::Dispatcher, router::AppState},
    application::{ports::InventoryRepository, use_cases::InventoryUseCase},
    infrastructure::persistence::InMemoryInventoryRepository,
    Config,
};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(config.log_json);

    info!("Starting inventory service");
    config.validate().map_err(anyhow::Error::msg)?;
    info!("Configuration loaded and validated");

    let repository: Arc<dyn InventoryRepository> = Arc::new(InMemoryInventoryRepository::new());
    let inventory_use_case = Arc::new(InventoryUseCase::new(repository));
    let dispatcher = Arc::new(Dispatcher::with_tracing(config.error_handling()));

    let app = create_router(AppState {
        inventory_use_case,
        dispatcher,
    });

    info!("Listening on {}", config.listen_addr);
    let listener = TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
