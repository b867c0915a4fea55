//! HTTP-to-gRPC gateway for todo items.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌───────────────────────────────────────────────┐
//!     ────────────────────┼─▶ http::server ──▶ todo::routes               │
//!                         │                       │                       │
//!                         │                       ▼                       │
//!                         │               todo::handlers                  │
//!                         │       (validate, translate via todo::model)   │
//!                         │                       │                       │
//!                         │                       ▼                       │      gRPC
//!     Client Response     │               backend::client ────────────────┼──▶ todo-manager
//!     ◀───────────────────┼── http::error / http::response ◀──────────────┼───
//!                         │                                               │
//!                         │  config · observability · lifecycle           │
//!                         └───────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod backend;
pub mod config;
pub mod http;
pub mod todo;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use backend::{GrpcTodoBackend, TodoBackend};
pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
