//! Backend error definitions.

use thiserror::Error;
use tonic::Code;

/// Errors that can occur while talking to the todo manager.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The configured address is not a valid endpoint URI.
    #[error("invalid backend address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },

    /// The channel could not be established.
    #[error("unable to connect to backend at {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },

    /// The remote call returned a non-OK status.
    #[error("backend call failed: {}", .0.message())]
    Rpc(#[from] tonic::Status),
}

impl BackendError {
    /// gRPC status code of a failed call, if the failure came from a call.
    pub fn code(&self) -> Option<Code> {
        match self {
            BackendError::Rpc(status) => Some(status.code()),
            _ => None,
        }
    }
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
