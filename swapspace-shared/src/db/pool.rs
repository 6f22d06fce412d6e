/// Database connection pool management
///
/// The pool is created once at startup and shared by both PostgreSQL stores.
/// A failed initial connection does not stop the server: see
/// [`connect_or_lazy`].
///
/// # Example
///
/// ```no_run
/// use swapspace_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: "postgresql://localhost:5432/swapspace".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     Ok(())
/// }
/// ```

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Default connection string when none is configured
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost:5432/swapspace";

/// Configuration for the database connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of idle connections to maintain
    pub min_connections: u32,

    /// Timeout for acquiring a connection (seconds)
    pub connect_timeout_seconds: u64,

    /// Idle connections are closed after this long (seconds)
    pub idle_timeout_seconds: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
        }
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    let mut options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds));

    if let Some(idle_timeout) = config.idle_timeout_seconds {
        options = options.idle_timeout(Duration::from_secs(idle_timeout));
        debug!(idle_timeout_seconds = idle_timeout, "Set idle timeout");
    }

    options
}

/// Creates the pool and verifies connectivity
///
/// # Errors
///
/// Returns an error if the URL is invalid, the database is unreachable or the
/// health check fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        connect_timeout_seconds = config.connect_timeout_seconds,
        "Creating database connection pool"
    );

    let pool = pool_options(&config).connect(&config.url).await?;
    health_check(&pool).await?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Creates the pool, falling back to lazy connections if the database is down
///
/// The second element is `true` when the initial connection succeeded. On
/// failure the error is logged and a lazy pool is returned, so later requests
/// fail one by one instead of the process exiting. There is no retry policy
/// beyond the pool's own reconnect-on-acquire.
///
/// # Errors
///
/// Only fails if the connection URL cannot be parsed.
pub async fn connect_or_lazy(config: DatabaseConfig) -> Result<(PgPool, bool), sqlx::Error> {
    match create_pool(config.clone()).await {
        Ok(pool) => Ok((pool, true)),
        Err(e) => {
            error!(error = %e, "Database connection failed, continuing with a lazy pool");
            let pool = pool_options(&config)
                .min_connections(0)
                .connect_lazy(&config.url)?;
            Ok((pool, false))
        }
    }
}

/// Executes `SELECT 1` to verify the database responds
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        Ok(())
    } else {
        warn!("Database health check returned unexpected value: {}", result.0);
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

/// Closes the pool during shutdown
pub async fn close_pool(pool: PgPool) {
    info!("Closing database connection pool");
    pool.close().await;
    info!("Database connection pool closed");
}
