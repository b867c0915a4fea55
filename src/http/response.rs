//! Response encoding.
//!
//! Bodies are serialized explicitly rather than through `axum::Json` so an
//! encoding failure surfaces as [`ApiError::Render`].

use axum::{
    body::Bytes,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::http::error::ApiError;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_NDJSON: &str = "application/x-ndjson";

/// Encode `value` as a JSON response with the given status.
pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value)?;
    Ok((
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))],
        body,
    )
        .into_response())
}

/// Encode `value` as a single newline-terminated JSON line.
pub fn json_line<T: Serialize>(value: &T) -> Result<Bytes, serde_json::Error> {
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    Ok(Bytes::from(line))
}
