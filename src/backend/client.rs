//! Todo-manager client over a single gRPC channel.
//!
//! # Responsibilities
//! - Dial the configured backend once at startup
//! - Expose typed list/create/get/update/delete calls
//! - Record per-call metrics
//!
//! No retries here. A dropped call future cancels the underlying RPC.

use std::future::Future;
use std::time::{Duration, Instant};

use futures_util::stream::{BoxStream, StreamExt};
use tonic::transport::{Channel, Endpoint};
use tonic::Request;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::proto::{self, TodoManagerClient};
use crate::config::BackendConfig;
use crate::observability::metrics;

/// Open-ended sequence of todo records returned by a list call.
pub type TodoStream = BoxStream<'static, BackendResult<proto::Todo>>;

/// Operations the gateway needs from the todo manager.
///
/// Every call is keyed by owner; the backend is the system of record.
#[tonic::async_trait]
pub trait TodoBackend: Send + Sync {
    /// Open a stream over all todos owned by `owner`.
    async fn list_todos(&self, owner: &str) -> BackendResult<TodoStream>;

    /// Create a todo; the backend assigns its ID.
    async fn create_todo(&self, todo: proto::Todo) -> BackendResult<proto::Todo>;

    async fn get_todo(&self, id: &str, owner: &str) -> BackendResult<proto::Todo>;

    async fn update_todo(&self, todo: proto::Todo) -> BackendResult<proto::Todo>;

    async fn delete_todo(&self, id: &str, owner: &str) -> BackendResult<proto::DeleteTodoRes>;
}

/// gRPC implementation of [`TodoBackend`].
#[derive(Debug, Clone)]
pub struct GrpcTodoBackend {
    client: TodoManagerClient<Channel>,
}

impl GrpcTodoBackend {
    /// Connect to the backend described by `config`.
    ///
    /// # Returns
    /// A connected client, or an error if the address is invalid or the
    /// channel cannot be established within the connect timeout.
    pub async fn connect(config: &BackendConfig) -> BackendResult<Self> {
        let mut endpoint = Endpoint::from_shared(config.address.clone())
            .map_err(|source| BackendError::InvalidAddress {
                address: config.address.clone(),
                source,
            })?
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let Some(secs) = config.request_timeout_secs {
            endpoint = endpoint.timeout(Duration::from_secs(secs));
        }

        let channel = endpoint
            .connect()
            .await
            .map_err(|source| BackendError::Connect {
                address: config.address.clone(),
                source,
            })?;

        tracing::info!(address = %config.address, "Backend channel established");

        Ok(Self {
            client: TodoManagerClient::new(channel),
        })
    }

    fn client(&self) -> TodoManagerClient<Channel> {
        self.client.clone()
    }
}

/// Run a backend call and record its outcome.
async fn observe<T, F>(operation: &'static str, call: F) -> BackendResult<T>
where
    F: Future<Output = Result<T, tonic::Status>>,
{
    let start = Instant::now();
    let result = call.await;
    metrics::record_backend_call(operation, result.is_ok(), start);
    if let Err(status) = &result {
        tracing::debug!(operation, code = ?status.code(), message = status.message(), "Backend call failed");
    }
    result.map_err(BackendError::from)
}

#[tonic::async_trait]
impl TodoBackend for GrpcTodoBackend {
    async fn list_todos(&self, owner: &str) -> BackendResult<TodoStream> {
        let mut client = self.client();
        let request = Request::new(proto::ListTodosReq {
            owner: owner.to_string(),
        });
        let response = observe("list_todos", client.list_todos(request)).await?;

        Ok(response
            .into_inner()
            .map(|item| item.map_err(BackendError::from))
            .boxed())
    }

    async fn create_todo(&self, todo: proto::Todo) -> BackendResult<proto::Todo> {
        let mut client = self.client();
        let response = observe("create_todo", client.create_todo(Request::new(todo))).await?;
        Ok(response.into_inner())
    }

    async fn get_todo(&self, id: &str, owner: &str) -> BackendResult<proto::Todo> {
        let mut client = self.client();
        let request = Request::new(proto::TodoIdReq {
            id: id.to_string(),
            owner: owner.to_string(),
        });
        let response = observe("get_todo", client.get_todo(request)).await?;
        Ok(response.into_inner())
    }

    async fn update_todo(&self, todo: proto::Todo) -> BackendResult<proto::Todo> {
        let mut client = self.client();
        let response = observe("update_todo", client.update_todo(Request::new(todo))).await?;
        Ok(response.into_inner())
    }

    async fn delete_todo(&self, id: &str, owner: &str) -> BackendResult<proto::DeleteTodoRes> {
        let mut client = self.client();
        let request = Request::new(proto::TodoIdReq {
            id: id.to_string(),
            owner: owner.to_string(),
        });
        let response = observe("delete_todo", client.delete_todo(request)).await?;
        Ok(response.into_inner())
    }
}
