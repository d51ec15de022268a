//! Helper utilities for the meal planner backend
//!
//! Small, pure functions used across the application: construction of the
//! JSON response envelopes and lenient parsing of request bodies.

use crate::error::{AppError, Result};
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query},
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

/// Builds a success envelope carrying a single payload.
///
/// Shape: `{"success": true, "data": ...}`.
pub fn api_success(data: impl Serialize) -> Value {
    json!({
        "success": true,
        "data": data,
    })
}

/// Builds a success envelope for a collection, including its length.
///
/// Shape: `{"success": true, "data": [...], "count": n}`.
pub fn api_list<T: Serialize>(items: &[T]) -> Value {
    json!({
        "success": true,
        "data": items,
        "count": items.len(),
    })
}

/// Builds an error envelope.
///
/// Shape: `{"success": false, "error": "..."}`.
pub fn api_error(message: impl Into<String>) -> Value {
    json!({
        "success": false,
        "error": message.into(),
    })
}

/// Query string extractor that lets the handler turn a rejection into an
/// [`AppError`], so malformed query strings still get the JSON envelope.
pub type QueryParams<T> = std::result::Result<Query<T>, QueryRejection>;

/// Parses an optional JSON request body.
///
/// An empty (or whitespace-only) body is treated as `{}`, so every field of
/// `T` must tolerate being absent.
pub fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))
}
