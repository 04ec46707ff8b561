//! Remote task API abstraction.
//!
//! Defines the [`TaskApi`] trait the sync controller talks to. Concrete
//! implementations:
//! - [`http::HttpTaskApi`] — the REST backend over `reqwest`
//! - [`memory::InMemoryTaskApi`] — in-process store with fault injection, for tests

pub mod http;
pub mod memory;

use taskboard_proto::api::{CreateTaskRequest, UpdateTaskRequest};
use taskboard_proto::codec::CodecError;
use taskboard_proto::task::{BoardId, Status, Task, TaskId};

/// Errors returned by a [`TaskApi`] call.
///
/// Callers do not distinguish between these when reporting to the user;
/// the variant only matters for logs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never got a response (connect, DNS, I/O).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status} for {path}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request path.
        path: String,
    },

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(#[from] CodecError),

    /// The request URL could not be built from the configured base.
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),

    /// The backend refused the call without reaching the network.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Async access to the remote task store.
///
/// Mutations return nothing useful: the client never trusts a mutation
/// response and always refetches.
pub trait TaskApi: Send + Sync {
    /// Lists one board's tasks in one status.
    fn list_by_status(
        &self,
        board_id: &BoardId,
        status: Status,
    ) -> impl std::future::Future<Output = Result<Vec<Task>, ApiError>> + Send;

    /// Creates a task; the server assigns its identifier.
    fn create(
        &self,
        req: &CreateTaskRequest,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Updates the present fields of an existing task.
    fn update(
        &self,
        task_id: &TaskId,
        req: &UpdateTaskRequest,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;

    /// Deletes a task.
    fn delete(
        &self,
        task_id: &TaskId,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;
}
