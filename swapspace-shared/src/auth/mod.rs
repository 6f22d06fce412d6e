/// Authentication primitives
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and length validation
/// - [`session`]: signed, expiring session tokens
/// - [`middleware`]: bearer extraction and the per-request [`middleware::AuthContext`]
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use swapspace_shared::auth::password::{hash_password, verify_password};
/// use swapspace_shared::auth::session::{create_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let token = create_token(
///     &Claims::new("user1", Duration::hours(24)),
///     "an-example-secret-that-is-at-least-32-bytes",
/// )?;
/// assert!(!token.is_empty());
/// # Ok(())
/// # }
/// ```

pub mod middleware;
pub mod password;
pub mod session;
