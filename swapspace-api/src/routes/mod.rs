/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Banner and health check
/// - `items`: Item listing, search, creation and deletion
/// - `users`: User listing, creation and profile edits
/// - `auth`: Login, registration and session lookup

pub mod auth;
pub mod health;
pub mod items;
pub mod users;
