//! Message types, client and server stubs for `todomgr.TodoManager`.
//!
//! Generated from `proto/todomgr.proto` by `build.rs`.

tonic::include_proto!("todomgr");

pub use todo_manager_client::TodoManagerClient;
pub use todo_manager_server::{TodoManager, TodoManagerServer};
