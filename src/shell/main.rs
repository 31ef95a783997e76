use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use contact_book::modules::contacts::adapters::outbound::in_memory_store::InMemoryContactStore;
use contact_book::modules::contacts::adapters::outbound::sqlite_store::SqliteContactStore;
use contact_book::modules::contacts::application::contact_service::ContactService;
use contact_book::shell::config::{Config, Storage};
use contact_book::shell::http::router;
use contact_book::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("contact_book=info,tower_http=info")),
        )
        .init();

    let service = match &config.storage {
        Storage::InMemory => {
            tracing::warn!("using the in-memory contact store, data is lost on exit");
            let store = Arc::new(InMemoryContactStore::new());
            ContactService::new(store.clone(), store)
        }
        Storage::Sqlite {
            url,
            max_connections,
            synchronize,
        } => {
            let store = SqliteContactStore::connect(url, *max_connections).await?;
            if *synchronize {
                store.synchronize().await?;
            }
            tracing::info!(%url, "connected to contact database");
            let store = Arc::new(store);
            ContactService::new(store.clone(), store)
        }
    };

    let app = router(AppState {
        contacts: Arc::new(service),
    });

    tracing::info!("Contact book listening on http://{}/contacts", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
