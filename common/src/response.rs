//! Response body for row-returning endpoints.
//!
//! Benchmark endpoints answer with a bare JSON array of rows, no envelope.

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::errors::AppError;

/// A result set rendered as a JSON array.
///
/// An empty set renders as `[]`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonArray<T>(pub Vec<T>);

impl<T> JsonArray<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> From<Vec<T>> for JsonArray<T> {
    fn from(rows: Vec<T>) -> Self {
        Self(rows)
    }
}

impl<T: Serialize> IntoResponse for JsonArray<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                body,
            )
                .into_response(),
            Err(err) => AppError::Internal(err.to_string()).into_response(),
        }
    }
}
