//! Todo resource: routes, handlers and the JSON model.
//!
//! # Data Flow
//! ```text
//! routes.rs (method + path → handler)
//!     → handlers.rs (validate, call backend)
//!     → model.rs (wire JSON ↔ backend message)
//! ```

pub mod handlers;
pub mod model;
pub mod routes;

pub use handlers::OWNER;
pub use model::{DeleteAck, Todo};
