//! Request extractors.

use axum::{Json, extract::FromRequest};

use crate::error::ApiError;

/// `Json` whose rejections render as an [`ApiError`] body.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
