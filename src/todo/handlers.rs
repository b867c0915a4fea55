//! Todo request handlers.
//!
//! Each handler validates its input first; nothing malformed reaches the
//! backend. Backend failures are rendered and the handler stops.

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::{future, Stream, StreamExt};
use serde::Serialize;

use crate::backend::BackendResult;
use crate::http::error::ApiError;
use crate::http::response::{self, json_line, APPLICATION_NDJSON};
use crate::http::server::AppState;
use crate::todo::model::{DeleteAck, Todo};

/// Owner attached to every backend call until real authentication exists.
pub const OWNER: &str = "anonymous";

/// Check that a path ID is an integer, returning it unchanged.
pub fn parse_todo_id(raw: &str) -> Result<&str, ApiError> {
    raw.parse::<i64>()
        .map(|_| raw)
        .map_err(|e| ApiError::invalid(format!("invalid todo ID '{}': {}", raw, e)))
}

fn decode_todo(body: &[u8]) -> Result<Todo, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::invalid(format!("invalid todo body: {}", e)))
}

/// Render records as newline-delimited JSON.
///
/// The first failure, whether from the backend or from encoding a record,
/// is written as one final error line and ends the stream.
pub fn ndjson_lines<S, T>(
    records: S,
) -> impl Stream<Item = Result<Bytes, serde_json::Error>> + Send + 'static
where
    S: Stream<Item = BackendResult<T>> + Send + 'static,
    T: Serialize,
{
    records.scan(false, |failed, item| {
        if *failed {
            return future::ready(None);
        }
        let line = item
            .map_err(ApiError::from)
            .and_then(|record| json_line(&record).map_err(ApiError::from));
        let line = match line {
            Ok(line) => Ok(line),
            Err(err) => {
                *failed = true;
                tracing::error!(error = %err, "Todo stream failed");
                json_line(&err.body())
            }
        };
        future::ready(Some(line))
    })
}

/// `GET /`: stream every todo as newline-delimited JSON.
///
/// A failure after records were written cannot change the status, so it is
/// emitted as a final error line and the body ends.
pub async fn list_todos(State(state): State<AppState>) -> Result<Response, ApiError> {
    let records = state.backend.list_todos(OWNER).await?;
    let lines = ndjson_lines(records.map(|item| item.map(Todo::from)));

    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_NDJSON))],
        Body::from_stream(lines),
    )
        .into_response())
}

/// `POST /`: create a todo. Text is required.
pub async fn create_todo(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let todo = decode_todo(&body)?;
    if todo.text.is_empty() {
        return Err(ApiError::invalid("Text can't be empty"));
    }

    let mut record = todo.to_backend(OWNER);
    record.id.clear();

    let created = state.backend.create_todo(record).await?;
    tracing::debug!(id = %created.id, "Todo created");
    response::json(StatusCode::CREATED, &Todo::from(created))
}

/// `GET /{id}`
pub async fn get_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_todo_id(&raw_id)?;
    let todo = state.backend.get_todo(id, OWNER).await?;
    response::json(StatusCode::OK, &Todo::from(todo))
}

/// `PUT /{id}`: replace a todo. A body ID, if present, must equal the path ID.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let id = parse_todo_id(&raw_id)?;
    let todo = decode_todo(&body)?;
    if !todo.id.is_empty() && todo.id != id {
        return Err(ApiError::invalid(
            "ID from JSON is not empty and doesn't match URL ID",
        ));
    }

    let mut record = todo.to_backend(OWNER);
    record.id = id.to_string();

    let updated = state.backend.update_todo(record).await?;
    response::json(StatusCode::OK, &Todo::from(updated))
}

/// `DELETE /{id}`
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_todo_id(&raw_id)?;
    let res = state.backend.delete_todo(id, OWNER).await?;
    response::json(StatusCode::OK, &DeleteAck::from(res))
}
