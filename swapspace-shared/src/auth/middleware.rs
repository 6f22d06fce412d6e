/// Request authentication context
///
/// The API's session middleware validates the bearer token and inserts an
/// [`AuthContext`] into the request extensions. Handlers read it with
/// `Extension<AuthContext>`.
///
/// # Example
///
/// ```
/// use swapspace_shared::auth::middleware::bearer_token;
///
/// let token = bearer_token(Some("Bearer abc.def.ghi")).unwrap();
/// assert_eq!(token, "abc.def.ghi");
/// ```

use serde::{Deserialize, Serialize};

use super::session::Claims;

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: String,

    /// `jti` of the presented token
    pub token_id: String,

    /// Token expiry (Unix timestamp)
    pub expires_at: i64,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            token_id: claims.jti,
            expires_at: claims.exp,
        }
    }
}

/// Error type for credential extraction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingCredentials,

    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),
}

/// Extracts the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingCredentials)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidFormat("Empty bearer token".to_string()));
    }

    Ok(token)
}
