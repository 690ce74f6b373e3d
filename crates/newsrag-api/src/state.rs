//! Application state wiring the store, retrieval client, and services.
//!
//! Services are generic over the `SessionStore` and `RetrievalClient`
//! traits; `AppState` pins them to the concrete infra implementations.

use std::path::PathBuf;

use newsrag_core::ask::QueryService;
use newsrag_core::deletion::DeletionManager;
use newsrag_core::history::HistoryWindower;
use newsrag_core::listing::ChatLister;
use newsrag_infra::config::load_config;
use newsrag_infra::retrieval::HttpRetrievalClient;
use newsrag_infra::sqlite::pool::DatabasePool;
use newsrag_infra::sqlite::session::SqliteSessionStore;
use newsrag_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteQueryService = QueryService<SqliteSessionStore, HttpRetrievalClient>;

/// Shared application state holding all services.
pub struct AppState {
    pub query_service: ConcreteQueryService,
    pub windower: HistoryWindower<SqliteSessionStore>,
    pub lister: ChatLister<SqliteSessionStore>,
    pub deletion: DeletionManager<SqliteSessionStore>,
    pub store: SqliteSessionStore,
    pub config: AppConfig,
}

/// Resolve the data directory from `NEWSRAG_DATA_DIR`, falling back to
/// `~/.newsrag`.
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var("NEWSRAG_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".newsrag")
        }
    }
}

impl AppState {
    /// Initialize the application state: connect to the database, load
    /// config, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("newsrag.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let config = load_config(&data_dir).await;

        let store = SqliteSessionStore::new(db_pool);
        let retrieval = HttpRetrievalClient::from_config(&config.retrieval);

        Ok(Self {
            query_service: QueryService::new(store.clone(), retrieval),
            windower: HistoryWindower::new(store.clone()),
            lister: ChatLister::new(store.clone()),
            deletion: DeletionManager::new(store.clone()),
            store,
            config,
        })
    }
}
