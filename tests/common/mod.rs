//! Shared utilities for integration tests.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Code, Request, Response, Status};

use todo_gateway::backend::proto::{self, TodoManager, TodoManagerServer};
use todo_gateway::backend::{BackendError, BackendResult, TodoBackend, TodoStream};
use todo_gateway::config::BackendConfig;
use todo_gateway::{GatewayConfig, GrpcTodoBackend, HttpServer, Shutdown};

/// A backend call as seen by the recording backend.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Call {
    List { owner: String },
    Create(proto::Todo),
    Get { id: String, owner: String },
    Update(proto::Todo),
    Delete { id: String, owner: String },
}

#[derive(Default)]
struct State {
    todos: BTreeMap<u64, proto::Todo>,
    next_id: u64,
    calls: Vec<Call>,
    failure: Option<(Code, String)>,
    list_fail_after: Option<usize>,
}

/// In-memory todo manager that records every call it receives.
#[derive(Default)]
pub struct RecordingBackend {
    state: Mutex<State>,
}

#[allow(dead_code)]
impl RecordingBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store a todo directly, bypassing the call log.
    pub fn seed(&self, owner: &str, text: &str, done: bool) -> proto::Todo {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let todo = proto::Todo {
            id: state.next_id.to_string(),
            owner: owner.to_string(),
            text: text.to_string(),
            done,
        };
        let id = state.next_id;
        state.todos.insert(id, todo.clone());
        todo
    }

    /// Make every subsequent call fail with the given status.
    pub fn fail_with(&self, code: Code, message: &str) {
        self.state.lock().unwrap().failure = Some((code, message.to_string()));
    }

    /// Break list streams after `n` records.
    pub fn break_list_after(&self, n: usize) {
        self.state.lock().unwrap().list_fail_after = Some(n);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    fn record(&self, call: Call) -> Result<std::sync::MutexGuard<'_, State>, Status> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match &state.failure {
            Some((code, message)) => Err(Status::new(*code, message.clone())),
            None => Ok(state),
        }
    }
}

fn parse_id(id: &str) -> Result<u64, Status> {
    id.parse()
        .map_err(|_| Status::invalid_argument(format!("bad id {}", id)))
}

#[tonic::async_trait]
impl TodoBackend for RecordingBackend {
    async fn list_todos(&self, owner: &str) -> BackendResult<TodoStream> {
        let state = self.record(Call::List {
            owner: owner.to_string(),
        })?;

        let mut items: Vec<BackendResult<proto::Todo>> = state
            .todos
            .values()
            .filter(|t| t.owner == owner)
            .cloned()
            .map(Ok)
            .collect();
        if let Some(n) = state.list_fail_after {
            items.truncate(n);
            items.push(Err(Status::internal("stream broken").into()));
        }

        Ok(stream::iter(items).boxed())
    }

    async fn create_todo(&self, todo: proto::Todo) -> BackendResult<proto::Todo> {
        let mut state = self.record(Call::Create(todo.clone()))?;
        state.next_id += 1;
        let id = state.next_id;
        let created = proto::Todo {
            id: id.to_string(),
            ..todo
        };
        state.todos.insert(id, created.clone());
        Ok(created)
    }

    async fn get_todo(&self, id: &str, owner: &str) -> BackendResult<proto::Todo> {
        let state = self.record(Call::Get {
            id: id.to_string(),
            owner: owner.to_string(),
        })?;
        let key = parse_id(id)?;
        state
            .todos
            .get(&key)
            .filter(|t| t.owner == owner)
            .cloned()
            .ok_or_else(|| Status::not_found(format!("todo {} not found", id)).into())
    }

    async fn update_todo(&self, todo: proto::Todo) -> BackendResult<proto::Todo> {
        let mut state = self.record(Call::Update(todo.clone()))?;
        let key = parse_id(&todo.id)?;
        match state.todos.get_mut(&key) {
            Some(existing) if existing.owner == todo.owner => {
                *existing = todo.clone();
                Ok(todo)
            }
            _ => Err(Status::not_found(format!("todo {} not found", todo.id)).into()),
        }
    }

    async fn delete_todo(&self, id: &str, owner: &str) -> BackendResult<proto::DeleteTodoRes> {
        let mut state = self.record(Call::Delete {
            id: id.to_string(),
            owner: owner.to_string(),
        })?;
        let key = parse_id(id)?;
        let owned = state.todos.get(&key).is_some_and(|t| t.owner == owner);
        if !owned {
            return Err(Status::not_found(format!("todo {} not found", id)).into());
        }
        state.todos.remove(&key);
        Ok(proto::DeleteTodoRes { success: true })
    }
}

/// Serves a [`RecordingBackend`] as a real `todomgr.TodoManager` gRPC service.
#[allow(dead_code)]
pub struct TodoManagerService {
    backend: Arc<RecordingBackend>,
}

#[allow(dead_code)]
fn into_status(err: BackendError) -> Status {
    match err {
        BackendError::Rpc(status) => status,
        other => Status::internal(other.to_string()),
    }
}

#[tonic::async_trait]
impl TodoManager for TodoManagerService {
    type ListTodosStream = BoxStream<'static, Result<proto::Todo, Status>>;

    async fn list_todos(
        &self,
        request: Request<proto::ListTodosReq>,
    ) -> Result<Response<Self::ListTodosStream>, Status> {
        let owner = request.into_inner().owner;
        let records = self.backend.list_todos(&owner).await.map_err(into_status)?;
        Ok(Response::new(records.map(|item| item.map_err(into_status)).boxed()))
    }

    async fn create_todo(&self, request: Request<proto::Todo>) -> Result<Response<proto::Todo>, Status> {
        let created = self
            .backend
            .create_todo(request.into_inner())
            .await
            .map_err(into_status)?;
        Ok(Response::new(created))
    }

    async fn get_todo(&self, request: Request<proto::TodoIdReq>) -> Result<Response<proto::Todo>, Status> {
        let req = request.into_inner();
        let todo = self
            .backend
            .get_todo(&req.id, &req.owner)
            .await
            .map_err(into_status)?;
        Ok(Response::new(todo))
    }

    async fn update_todo(&self, request: Request<proto::Todo>) -> Result<Response<proto::Todo>, Status> {
        let updated = self
            .backend
            .update_todo(request.into_inner())
            .await
            .map_err(into_status)?;
        Ok(Response::new(updated))
    }

    async fn delete_todo(
        &self,
        request: Request<proto::TodoIdReq>,
    ) -> Result<Response<proto::DeleteTodoRes>, Status> {
        let req = request.into_inner();
        let res = self
            .backend
            .delete_todo(&req.id, &req.owner)
            .await
            .map_err(into_status)?;
        Ok(Response::new(res))
    }
}

/// Serve `backend` over gRPC on an ephemeral port and dial it with
/// [`GrpcTodoBackend::connect`].
#[allow(dead_code)]
pub async fn spawn_todo_manager(backend: Arc<RecordingBackend>) -> (GrpcTodoBackend, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let mut server_shutdown = shutdown.subscribe();
    let service = TodoManagerServer::new(TodoManagerService { backend });

    tokio::spawn(async move {
        let _ = tonic::transport::Server::builder()
            .add_service(service)
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
                let _ = server_shutdown.recv().await;
            })
            .await;
    });

    let config = BackendConfig {
        address: format!("http://{}", addr),
        connect_timeout_secs: 5,
        request_timeout_secs: None,
    };
    let client = GrpcTodoBackend::connect(&config).await.unwrap();
    (client, shutdown)
}

/// Backend whose `get_todo` never completes.
///
/// `started` fires once the call is in flight; `dropped` fires when the
/// call future is dropped.
#[allow(dead_code)]
#[derive(Default)]
pub struct HangingBackend {
    pub started: Arc<Notify>,
    pub dropped: Arc<Notify>,
}

#[allow(dead_code)]
struct DropSignal(Arc<Notify>);

impl Drop for DropSignal {
    fn drop(&mut self) {
        self.0.notify_one();
    }
}

#[allow(dead_code)]
impl HangingBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[tonic::async_trait]
impl TodoBackend for HangingBackend {
    async fn list_todos(&self, _owner: &str) -> BackendResult<TodoStream> {
        Err(Status::unimplemented("list").into())
    }

    async fn create_todo(&self, _todo: proto::Todo) -> BackendResult<proto::Todo> {
        Err(Status::unimplemented("create").into())
    }

    async fn get_todo(&self, _id: &str, _owner: &str) -> BackendResult<proto::Todo> {
        let _signal = DropSignal(self.dropped.clone());
        self.started.notify_one();
        std::future::pending().await
    }

    async fn update_todo(&self, _todo: proto::Todo) -> BackendResult<proto::Todo> {
        Err(Status::unimplemented("update").into())
    }

    async fn delete_todo(&self, _id: &str, _owner: &str) -> BackendResult<proto::DeleteTodoRes> {
        Err(Status::unimplemented("delete").into())
    }
}

/// Serve a gateway on an ephemeral port in front of `backend`.
#[allow(dead_code)]
pub async fn spawn_gateway(backend: Arc<dyn TodoBackend>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = GatewayConfig::default();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, backend);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// In-process router in front of `backend`, for `oneshot` tests.
#[allow(dead_code)]
pub fn router(backend: Arc<RecordingBackend>) -> axum::Router {
    HttpServer::new(GatewayConfig::default(), backend).router()
}
