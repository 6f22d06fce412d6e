/// Session tokens
///
/// A session token is an HS256-signed JWT naming the user (`sub`), issued by
/// `swapspace`, with an expiry and a random `jti`. Every token is distinct,
/// even two issued to the same user within the same second. There is no
/// server-side session table: the signature and expiry are checked on every
/// authenticated request.
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use swapspace_shared::auth::session::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "an-example-secret-that-is-at-least-32-bytes";
/// let claims = Claims::new("user1", Duration::hours(24));
/// let token = create_token(&claims, secret)?;
///
/// let validated = validate_token(&token, secret)?;
/// assert_eq!(validated.sub, "user1");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer claim stamped on every session token
pub const ISSUER: &str = "swapspace";

/// Default token lifetime
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionTokenError {
    #[error("Failed to create token: {0}")]
    CreateError(String),

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Session token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: String,

    /// Issuer - always [`ISSUER`]
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Random token id
    pub jti: String,
}

impl Claims {
    /// Creates claims for `user_id` expiring after `ttl`
    pub fn new(user_id: &str, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signs claims into a token string
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, SessionTokenError> {
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::new(Algorithm::HS256), claims, &key)
        .map_err(|e| SessionTokenError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies signature, issuer, expiry and not-before, returning the claims
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, SessionTokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionTokenError::Expired,
        _ => SessionTokenError::Invalid(e.to_string()),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_new() {
        let claims = Claims::new("user1", Duration::hours(24));

        assert_eq!(claims.sub, "user1");
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_create_and_validate() {
        let claims = Claims::new("user1", Duration::hours(1));
        let token = create_token(&claims, SECRET).unwrap();

        let validated = validate_token(&token, SECRET).unwrap();
        assert_eq!(validated, claims);
    }

    #[test]
    fn test_tokens_are_distinct() {
        let first = create_token(&Claims::new("user1", Duration::hours(1)), SECRET).unwrap();
        let second = create_token(&Claims::new("user1", Duration::hours(1)), SECRET).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(&Claims::new("user1", Duration::hours(1)), SECRET).unwrap();

        let err = validate_token(&token, "another-secret-key-at-least-32-bytes").unwrap_err();
        assert!(matches!(err, SessionTokenError::Invalid(_)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::new("user1", Duration::minutes(-10));
        let token = create_token(&claims, SECRET).unwrap();
        assert!(matches!(
            validate_token(&token, SECRET),
            Err(SessionTokenError::Expired)
        ));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let mut claims = Claims::new("user1", Duration::hours(1));
        claims.iss = "someone-else".to_string();
        let token = create_token(&claims, SECRET).unwrap();

        assert!(matches!(
            validate_token(&token, SECRET),
            Err(SessionTokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(validate_token("not-a-token", SECRET).is_err());
    }
}
