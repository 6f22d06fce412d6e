/// User endpoints
///
/// # Endpoints
///
/// - `GET /api/users` - Public user list, optional `?email=` filter
/// - `POST /api/users` - Create an account without logging in
/// - `PUT /api/users/:id` - Edit own profile (session required)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiJson,
    routes::auth::RegisterRequest,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use swapspace_shared::{
    auth::middleware::AuthContext,
    models::user::{PublicUser, UpdateUser},
};
use validator::Validate;

#[derive(Debug, Default, Deserialize)]
pub struct UserFilter {
    pub email: Option<String>,
}

/// Profile update request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> ApiResult<Json<Vec<PublicUser>>> {
    let email = filter.email.as_deref().filter(|e| !e.trim().is_empty());
    Ok(Json(state.auth.list_users(email).await?))
}

/// Creates an account
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Email already exists
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    req.validate()?;

    let user = state.auth.create_user(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Updates the caller's own profile
///
/// # Errors
///
/// - `403 Forbidden`: `id` is not the session user
/// - `404 Not Found`: User no longer exists
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> ApiResult<Json<PublicUser>> {
    if auth.user_id != id {
        return Err(ApiError::Forbidden(
            "Users can only edit their own profile".to_string(),
        ));
    }

    req.validate()?;

    let changes = UpdateUser {
        name: req.name.map(|n| n.trim().to_string()),
        location: req.location,
    };

    Ok(Json(state.auth.update_profile(&id, changes).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_profile_validation() {
        let ok = UpdateProfileRequest {
            name: Some("Jamie".to_string()),
            location: None,
        };
        assert!(ok.validate().is_ok());
        assert!(UpdateProfileRequest::default().validate().is_ok());

        let empty_name = UpdateProfileRequest {
            name: Some(String::new()),
            location: None,
        };
        assert!(empty_name.validate().is_err());
    }
}
