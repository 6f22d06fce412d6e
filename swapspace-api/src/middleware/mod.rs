/// Middleware modules for the API server
///
/// - `security`: security response headers
/// - `session`: bearer token authentication

pub mod security;
pub mod session;
