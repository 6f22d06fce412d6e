//! # SwapSpace API Server Library
//!
//! HTTP JSON API for the SwapSpace barter marketplace.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: JSON body extractor with API-shaped rejections
//! - `middleware`: Security headers and session authentication
//! - `routes`: API route handlers
//! - `stores`: Store backend selection at startup

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod stores;
