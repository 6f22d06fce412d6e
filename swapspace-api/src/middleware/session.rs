/// Session authentication middleware
///
/// Validates the `Authorization: Bearer <token>` header against the auth
/// service and injects an [`AuthContext`] into request extensions. Handlers
/// read it with `Extension<AuthContext>` (required routes) or
/// `Option<Extension<AuthContext>>` (optional routes).
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Extension, Router};
/// use swapspace_api::{app::AppState, middleware::session::require_session};
/// use swapspace_shared::auth::middleware::AuthContext;
///
/// async fn whoami(Extension(auth): Extension<AuthContext>) -> String {
///     auth.user_id
/// }
///
/// # fn example(state: AppState) -> Router {
/// Router::new()
///     .route("/whoami", get(whoami))
///     .layer(axum::middleware::from_fn_with_state(state.clone(), require_session))
///     .with_state(state)
/// # }
/// ```

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use swapspace_shared::auth::middleware::{bearer_token, AuthContext};
use tracing::debug;

use crate::{app::AppState, error::ApiError};

/// Rejects requests without a valid session token
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = authorization(&req);
    let token = bearer_token(header.as_deref())?;

    let context = authenticate(&state, token).await?;
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

/// Authenticates the request if it carries a token
///
/// A missing header passes through anonymously; a present but invalid one
/// is rejected.
pub async fn optional_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(header) = authorization(&req) {
        let token = bearer_token(Some(header.as_str()))?;
        let context = authenticate(&state, token).await?;
        req.extensions_mut().insert(context);
    }

    Ok(next.run(req).await)
}

fn authorization(req: &Request) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn authenticate(state: &AppState, token: &str) -> Result<AuthContext, ApiError> {
    let (context, user) = state.auth.authenticate(token).await.map_err(|e| {
        debug!(error = %e, "Rejected session token");
        ApiError::from(e)
    })?;

    debug!(user_id = %user.id, token_id = %context.token_id, "Session authenticated");
    Ok(context)
}
