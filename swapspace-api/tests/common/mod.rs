//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - In-memory stores behind a fully wired router
//! - Registered test users with session tokens
//! - Request helpers returning status and JSON body

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use swapspace_api::app::{build_router, AppState};
use swapspace_api::config::{ApiConfig, Config, SessionConfig, StoreBackend, StoreConfig};
use swapspace_shared::store::memory::{MemoryItemStore, MemoryUserStore};
use swapspace_shared::store::ItemStore;
use tower::Service as _;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";
pub const TEST_PASSWORD: &str = "password123";

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: axum::Router,
    pub items: Arc<MemoryItemStore>,
    pub config: Config,
}

/// A registered user and its session token
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl TestUser {
    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
            database_url: String::new(),
            max_connections: 1,
            seed_sample_data: false,
        },
        session: SessionConfig {
            secret: TEST_SECRET.to_string(),
            ttl_hours: 1,
        },
    }
}

impl TestContext {
    /// Creates a new test context with empty in-memory stores
    pub fn new() -> Self {
        let config = test_config();
        let items = Arc::new(MemoryItemStore::new());
        let items_dyn: Arc<dyn ItemStore> = items.clone();

        let state = AppState::new(items_dyn, Arc::new(MemoryUserStore::new()), config.clone());
        let app = build_router(state);

        TestContext { app, items, config }
    }

    /// Sends a request and returns the status and raw body
    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        auth: Option<&str>,
    ) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, headers, bytes.to_vec())
    }

    /// Sends a request and parses the body as JSON (`Null` when empty)
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        auth: Option<&str>,
    ) -> (StatusCode, Value) {
        let (status, _, bytes) = self.send_raw(method, uri, body, auth).await;
        if bytes.is_empty() {
            return (status, Value::Null);
        }

        let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!(
                "Expected JSON from {} {}, got {}: {}",
                method,
                uri,
                status,
                String::from_utf8_lossy(&bytes)
            )
        });
        (status, value)
    }

    /// Registers a user through the API and returns its session
    pub async fn register(&self, name: &str, email: &str) -> TestUser {
        let (status, body) = self
            .send(
                "POST",
                "/api/register",
                Some(json!({
                    "name": name,
                    "email": email,
                    "password": TEST_PASSWORD,
                    "location": "Portland, OR"
                })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

        TestUser {
            id: body["user"]["id"].as_str().unwrap().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Creates an item and returns the response body
    pub async fn create_item(&self, item: Value, auth: Option<&str>) -> Value {
        let (status, body) = self.send("POST", "/api/items", Some(item), auth).await;
        assert_eq!(status, StatusCode::CREATED, "create item failed: {}", body);
        body
    }
}
