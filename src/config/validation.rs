//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check address formats before anything binds or dials
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("backend.address '{0}' must start with http:// or https://")]
    BackendAddress(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("http.route_prefix '{0}' must start with '/' and not end with '/'")]
    RoutePrefix(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let address = &config.backend.address;
    if !(address.starts_with("http://") || address.starts_with("https://")) {
        errors.push(ValidationError::BackendAddress(address.clone()));
    }

    if config.backend.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("backend.connect_timeout_secs"));
    }
    if config.backend.request_timeout_secs == Some(0) {
        errors.push(ValidationError::Zero("backend.request_timeout_secs"));
    }
    if config.http.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("http.request_timeout_secs"));
    }
    if config.http.max_body_size == 0 {
        errors.push(ValidationError::Zero("http.max_body_size"));
    }

    let prefix = &config.http.route_prefix;
    if !prefix.is_empty() && prefix != "/" && (!prefix.starts_with('/') || prefix.ends_with('/')) {
        errors.push(ValidationError::RoutePrefix(prefix.clone()));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
