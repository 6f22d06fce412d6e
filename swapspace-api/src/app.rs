/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use swapspace_api::{app::AppState, config::Config};
/// use swapspace_shared::store::memory::{MemoryItemStore, MemoryUserStore};
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(
///     Arc::new(MemoryItemStore::new()),
///     Arc::new(MemoryUserStore::new()),
///     config,
/// );
/// let app = swapspace_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::{
        security::SecurityHeadersLayer,
        session::{optional_session, require_session},
    },
};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use swapspace_shared::{
    services::{auth::AuthService, items::ItemService},
    store::{ItemStore, UserStore},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub items: ItemService,

    pub auth: AuthService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the services over the chosen stores
    pub fn new(items: Arc<dyn ItemStore>, users: Arc<dyn UserStore>, config: Config) -> Self {
        let auth = AuthService::new(
            users,
            items.clone(),
            &config.session.secret,
            config.session_ttl(),
        );

        Self {
            items: ItemService::new(items),
            auth,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                     # Banner (public)
/// ├── GET  /health               # Health check (public)
/// └── /api/
///     ├── GET    /items          # List or search (public)
///     ├── GET    /items/:id      # One item (public)
///     ├── POST   /items          # Create (optional session)
///     ├── DELETE /items/:id      # Delete (session)
///     ├── GET    /users          # List (public)
///     ├── POST   /users          # Create account (public)
///     ├── PUT    /users/:id      # Edit profile (session)
///     ├── POST   /login          # Log in (public)
///     ├── POST   /register       # Register and log in (public)
///     └── GET    /session        # Current user (session)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Security headers
/// 2. CORS (tower-http CorsLayer)
/// 3. Logging (tower-http TraceLayer)
/// 4. Session authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/items", get(routes::items::list_items))
        .route("/items/:id", get(routes::items::get_item))
        .route("/users", get(routes::users::list_users))
        .route("/users", post(routes::users::create_user))
        .route("/login", post(routes::auth::login))
        .route("/register", post(routes::auth::register));

    let optional_session_routes = Router::new()
        .route("/items", post(routes::items::create_item))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            optional_session,
        ));

    let session_routes = Router::new()
        .route("/items/:id", delete(routes::items::delete_item))
        .route("/users/:id", put(routes::users::update_user))
        .route("/session", get(routes::auth::current_session))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let api_routes = Router::new()
        .merge(public_routes)
        .merge(optional_session_routes)
        .merge(session_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}
