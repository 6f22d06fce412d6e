/// Request extractors
///
/// [`ApiJson`] behaves like `axum::Json` but rejects bad bodies with an
/// [`ApiError`], so a missing field or a wrong type yields the usual 400 JSON
/// error body instead of axum's plain-text 415/422.

use axum::extract::FromRequest;

use crate::error::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
