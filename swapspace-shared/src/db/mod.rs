/// Database layer for the PostgreSQL backend
///
/// # Modules
///
/// - `pool`: connection pool creation, lazy fallback and health checks
/// - `migrations`: embedded schema migrations
///
/// The stores built on top of the pool are in [`crate::store::postgres`].

pub mod migrations;
pub mod pool;
