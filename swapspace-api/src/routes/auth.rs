/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/login` - Exchange credentials for a session
/// - `POST /api/register` - Create an account and log in
/// - `GET /api/session` - Current user for a session token

use crate::{app::AppState, error::ApiResult, extract::ApiJson};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use swapspace_shared::{
    auth::middleware::AuthContext,
    models::user::PublicUser,
    services::auth::{Registration, Session},
};
use validator::Validate;

/// Registration request, shared with `POST /api/users`
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            name: req.name.trim().to_string(),
            email: req.email,
            password: req.password,
            location: req.location,
        }
    }
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Log in
///
/// ```text
/// POST /api/login
/// Content-Type: application/json
///
/// { "email": "alex@example.com", "password": "password123" }
/// ```
///
/// # Response
///
/// ```json
/// { "user": { "id": "…", "name": "Alex Johnson", … }, "token": "eyJ…" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body or empty password
/// - `401 Unauthorized`: Unknown email or wrong password
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<Session>> {
    req.validate()?;

    let session = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(session))
}

/// Register and log in
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Email already exists
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<Session>)> {
    req.validate()?;

    let session = state.auth.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// Current session user
pub async fn current_session(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<PublicUser>> {
    Ok(Json(state.auth.get_user(&auth.user_id).await?))
}
