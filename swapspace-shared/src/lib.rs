//! # SwapSpace Shared Library
//!
//! Domain types, storage backends and services behind the SwapSpace barter
//! marketplace API.
//!
//! ## Module Organization
//!
//! - `models`: Items, users and search filters
//! - `store`: Storage traits with in-memory and PostgreSQL backends
//! - `services`: Item catalog and authentication services
//! - `auth`: Password hashing, session tokens, request auth context
//! - `db`: PostgreSQL pool and migrations
//! - `seed`: Sample listings for a fresh store

pub mod auth;
pub mod db;
pub mod models;
pub mod seed;
pub mod services;
pub mod store;

/// Current version of the SwapSpace shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
