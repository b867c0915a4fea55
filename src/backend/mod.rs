//! Todo-manager backend subsystem.
//!
//! # Data Flow
//! ```text
//! BackendConfig (address, timeouts)
//!     → client.rs (dial once at startup, fatal on failure)
//!     → proto.rs (protobuf messages + raw gRPC stub)
//!     → TodoBackend trait object shared by all handlers
//! ```
//!
//! # Design Decisions
//! - One channel per process; tonic multiplexes concurrent calls over it
//! - Handlers depend on the `TodoBackend` trait, not on tonic
//! - Errors keep the gRPC status so the HTTP layer can map codes

pub mod client;
pub mod error;
pub mod proto;

pub use client::{GrpcTodoBackend, TodoBackend, TodoStream};
pub use error::{BackendError, BackendResult};
