//! Todo route table.

use axum::{routing::get, Router};

use crate::http::server::AppState;
use crate::todo::handlers::{create_todo, delete_todo, get_todo, list_todos, update_todo};

/// The five CRUD endpoints, relative to wherever the router is mounted.
///
/// ```text
/// GET    /       list
/// POST   /       create
/// GET    /{id}   get
/// PUT    /{id}   update
/// DELETE /{id}   delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/{id}", get(get_todo).put(update_todo).delete(delete_todo))
}
