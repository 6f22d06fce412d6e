/// Auth service
///
/// Registration, login, token verification and profile edits over the
/// [`UserStore`]. Every failure is returned to the caller; nothing falls
/// back to synthetic users.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::Duration;
/// use swapspace_shared::services::auth::{AuthService, Registration};
/// use swapspace_shared::store::memory::{MemoryItemStore, MemoryUserStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let auth = AuthService::new(
///     Arc::new(MemoryUserStore::new()),
///     Arc::new(MemoryItemStore::new()),
///     "an-example-secret-that-is-at-least-32-bytes",
///     Duration::hours(24),
/// );
///
/// auth.register(Registration {
///     name: "Alex Johnson".to_string(),
///     email: "alex@example.com".to_string(),
///     password: "password123".to_string(),
///     location: "Portland, OR".to_string(),
/// })
/// .await?;
///
/// let session = auth.login("alex@example.com", "password123").await?;
/// assert_eq!(session.user.name, "Alex Johnson");
/// # Ok(())
/// # }
/// ```

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::middleware::AuthContext;
use crate::auth::password::{self, PasswordError};
use crate::auth::session::{self, Claims, SessionTokenError};
use crate::models::user::{normalize_email, CreateUser, PublicUser, UpdateUser, User};
use crate::store::{ItemStore, StoreError, UserStore};

/// Error type for auth operations
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Unknown email or wrong password; the two are not distinguished
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already exists")]
    EmailTaken,

    #[error("{0}")]
    WeakPassword(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Token missing its user, tampered with or otherwise unusable
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Session expired")]
    SessionExpired,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(SessionTokenError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuthServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => AuthServiceError::EmailTaken,
            other => AuthServiceError::Store(other),
        }
    }
}

pub type AuthServiceResult<T> = Result<T, AuthServiceError>;

/// New account details, password in plaintext
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub location: String,
}

/// Public user plus a freshly issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: PublicUser,
    pub token: String,
}

/// Account and session operations
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    items: Arc<dyn ItemStore>,
    secret: Arc<str>,
    ttl: Duration,
}

impl AuthService {
    /// `items` is needed to keep listing owner names in sync with profiles
    pub fn new(
        users: Arc<dyn UserStore>,
        items: Arc<dyn ItemStore>,
        secret: &str,
        ttl: Duration,
    ) -> Self {
        Self {
            users,
            items,
            secret: Arc::from(secret),
            ttl,
        }
    }

    /// Creates an account without issuing a token
    ///
    /// # Errors
    ///
    /// `EmailTaken` if the email is registered already.
    pub async fn create_user(&self, registration: Registration) -> AuthServiceResult<PublicUser> {
        if self.users.find_by_email(&registration.email).await?.is_some() {
            debug!(email = %normalize_email(&registration.email), "Registration for existing email");
            return Err(AuthServiceError::EmailTaken);
        }

        password::validate_password_strength(&registration.password)
            .map_err(AuthServiceError::WeakPassword)?;
        let password_hash = password::hash_password(&registration.password)?;

        let user = self
            .users
            .create(CreateUser {
                name: registration.name,
                email: registration.email,
                password_hash,
                location: registration.location,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(PublicUser::from(user))
    }

    /// Creates an account and logs it in
    pub async fn register(&self, registration: Registration) -> AuthServiceResult<Session> {
        let user = self.create_user(registration).await?;
        let token = self.issue_token(&user.id)?;
        Ok(Session { user, token })
    }

    /// Verifies credentials and issues a new token
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for an unknown email and for a wrong password alike.
    pub async fn login(&self, email: &str, password: &str) -> AuthServiceResult<Session> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !password::verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login with wrong password");
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self.issue_token(&user.id)?;
        info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user: PublicUser::from(user),
            token,
        })
    }

    /// Checks a token's signature and expiry
    pub fn verify_token(&self, token: &str) -> AuthServiceResult<AuthContext> {
        let claims = session::validate_token(token, &self.secret).map_err(|e| match e {
            SessionTokenError::Expired => AuthServiceError::SessionExpired,
            other => AuthServiceError::Unauthorized(other.to_string()),
        })?;

        Ok(AuthContext::from_claims(claims))
    }

    /// Verifies a token and loads the user it names
    pub async fn authenticate(&self, token: &str) -> AuthServiceResult<(AuthContext, User)> {
        let context = self.verify_token(token)?;

        let user = self
            .users
            .find_by_id(&context.user_id)
            .await?
            .ok_or_else(|| AuthServiceError::Unauthorized("Unknown session user".to_string()))?;

        Ok((context, user))
    }

    /// Users without secrets, optionally filtered by exact email
    pub async fn list_users(&self, email: Option<&str>) -> AuthServiceResult<Vec<PublicUser>> {
        let users: Vec<User> = match email {
            Some(email) => self.users.find_by_email(email).await?.into_iter().collect(),
            None => self.users.list().await?,
        };

        Ok(users.into_iter().map(PublicUser::from).collect())
    }

    pub async fn get_user(&self, id: &str) -> AuthServiceResult<PublicUser> {
        self.users
            .find_by_id(id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| AuthServiceError::UserNotFound(id.to_string()))
    }

    /// Applies profile changes and refreshes owner names on the user's items
    pub async fn update_profile(&self, id: &str, changes: UpdateUser) -> AuthServiceResult<PublicUser> {
        let previous = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthServiceError::UserNotFound(id.to_string()))?;

        if changes.is_empty() {
            return Ok(PublicUser::from(previous));
        }

        let updated = self
            .users
            .update(id, changes)
            .await?
            .ok_or_else(|| AuthServiceError::UserNotFound(id.to_string()))?;

        if updated.name != previous.name {
            let touched = self.items.update_owner_name(&updated.id, &updated.name).await?;
            info!(user_id = %updated.id, items = touched, "Refreshed owner name on listings");
        }

        Ok(PublicUser::from(updated))
    }

    fn issue_token(&self, user_id: &str) -> AuthServiceResult<String> {
        session::create_token(&Claims::new(user_id, self.ttl), &self.secret)
            .map_err(AuthServiceError::Token)
    }
}
