//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the backend client produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every request span
//! - Metrics are cheap; the exporter is only installed when enabled

pub mod logging;
pub mod metrics;
