//! Request body extraction with JSON error responses.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` whose rejections (malformed JSON, an unknown enum variant, a
/// number out of range) surface as [`ApiError::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Body<T>(pub T);
