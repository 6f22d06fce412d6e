/// Store selection at startup
///
/// Opens the backend named by `STORE_BACKEND` and, when enabled, seeds the
/// sample listings into an empty item store.

use crate::config::{Config, StoreBackend};
use sqlx::PgPool;
use std::sync::Arc;
use swapspace_shared::{
    db::{
        migrations::{ensure_database_exists, run_migrations},
        pool::{close_pool, connect_or_lazy, DatabaseConfig},
    },
    seed::seed_if_empty,
    store::{
        memory::{MemoryItemStore, MemoryUserStore},
        postgres::{PgItemStore, PgUserStore},
        ItemStore, UserStore,
    },
};
use tracing::{info, warn};

/// The active stores plus the pool behind them, if any
pub struct Stores {
    pub items: Arc<dyn ItemStore>,
    pub users: Arc<dyn UserStore>,
    pool: Option<PgPool>,
}

impl Stores {
    /// Fresh in-memory stores
    pub fn memory() -> Self {
        Self {
            items: Arc::new(MemoryItemStore::new()),
            users: Arc::new(MemoryUserStore::new()),
            pool: None,
        }
    }

    /// Connects to PostgreSQL and applies migrations
    ///
    /// An unreachable database is not fatal: the pool connects lazily and
    /// requests fail individually until it comes back. Migrations only run
    /// when the initial connection succeeded.
    pub async fn postgres(config: &Config) -> anyhow::Result<Self> {
        let url = &config.store.database_url;

        if let Err(e) = ensure_database_exists(url).await {
            warn!(error = %e, "Could not verify the database exists");
        }

        let (pool, connected) = connect_or_lazy(DatabaseConfig {
            url: url.clone(),
            max_connections: config.store.max_connections,
            ..DatabaseConfig::default()
        })
        .await?;

        if connected {
            run_migrations(&pool).await?;
        } else {
            warn!("Skipping migrations until the database is reachable");
        }

        Ok(Self {
            items: Arc::new(PgItemStore::new(pool.clone())),
            users: Arc::new(PgUserStore::new(pool.clone())),
            pool: Some(pool),
        })
    }

    /// Opens the configured backend and seeds it if requested
    pub async fn open(config: &Config) -> anyhow::Result<Self> {
        let stores = match config.store.backend {
            StoreBackend::Memory => Self::memory(),
            StoreBackend::Postgres => Self::postgres(config).await?,
        };
        info!(backend = stores.items.backend(), "Stores ready");

        if config.store.seed_sample_data {
            match seed_if_empty(stores.items.as_ref()).await {
                Ok(count) if count > 0 => info!(count, "Sample listings inserted"),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Seeding sample listings failed"),
            }
        }

        Ok(stores)
    }

    /// Releases backend resources
    pub async fn close(self) {
        if let Some(pool) = self.pool {
            close_pool(pool).await;
        }
    }
}
