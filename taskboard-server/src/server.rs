//! HTTP routes, shared state and server startup.
//!
//! Routes mirror the production task API:
//!
//! ```text
//! GET    /api/tasks/board/{board_id}/status/{status}
//! POST   /api/tasks
//! PUT    /api/tasks/{task_id}
//! DELETE /api/tasks/{task_id}
//! ```
//!
//! Malformed path segments (an unknown status) are rejected with 400 and
//! malformed JSON bodies with 4xx by the axum extractors.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use taskboard_proto::api::{CreateTaskRequest, TaskListResponse, UpdateTaskRequest};
use taskboard_proto::task::{BoardId, Status, Task, TaskId};

use crate::store::{StoreError, TaskStore};

/// Shared server state.
#[derive(Default)]
pub struct ApiState {
    /// Task storage.
    pub store: TaskStore,
}

impl ApiState {
    /// Creates state with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::EmptyTitle => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

async fn list_tasks(
    State(state): State<Arc<ApiState>>,
    Path((board_id, status)): Path<(BoardId, Status)>,
) -> Json<TaskListResponse> {
    let data = state.store.list(&board_id, status).await;
    tracing::debug!(board_id = %board_id, status = %status, count = data.len(), "listed tasks");
    Json(TaskListResponse { data })
}

async fn create_task(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), StoreError> {
    let task = state.store.create(req).await?;
    tracing::info!(task_id = %task.id, status = %task.status, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<Arc<ApiState>>,
    Path(task_id): Path<TaskId>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, StoreError> {
    let task = state.store.update(&task_id, &req).await.inspect_err(|e| {
        tracing::warn!(task_id = %task_id, error = %e, "update rejected");
    })?;
    tracing::info!(task_id = %task.id, status = %task.status, "task updated");
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<Arc<ApiState>>,
    Path(task_id): Path<TaskId>,
) -> Result<StatusCode, StoreError> {
    state.store.delete(&task_id).await.inspect_err(|e| {
        tracing::warn!(task_id = %task_id, error = %e, "delete rejected");
    })?;
    tracing::info!(task_id = %task_id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Builds the router over the given state.
pub fn router(state: Arc<ApiState>) -> axum::Router {
    axum::Router::new()
        .route(
            "/api/tasks/board/{board_id}/status/{status}",
            get(list_tasks),
        )
        .route("/api/tasks", post(create_task))
        .route("/api/tasks/{task_id}", put(update_task).delete(delete_task))
        .with_state(state)
}

/// Starts the API server on the given address with fresh state.
///
/// Returns the bound socket address (useful when binding to port 0) and a
/// [`tokio::task::JoinHandle`] for the serve loop. This is the primary entry
/// point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(ApiState::new())).await
}

/// Starts the API server with pre-built [`ApiState`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<ApiState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "api server error");
        }
    });

    Ok((bound_addr, handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn start() -> (String, Arc<ApiState>) {
        let state = Arc::new(ApiState::new());
        let (addr, _handle) = start_server_with_state("127.0.0.1:0", Arc::clone(&state))
            .await
            .unwrap();
        (format!("http://{addr}"), state)
    }

    #[tokio::test]
    async fn create_then_list_by_status() {
        let (base, _state) = start().await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{base}/api/tasks"))
            .json(&json!({
                "title": "A",
                "description": "B",
                "status": "TODO",
                "boardId": "b1",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
        let created: Task = resp.json().await.unwrap();
        assert_eq!(created.title, "A");

        let list: TaskListResponse = client
            .get(format!("{base}/api/tasks/board/b1/status/TODO"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(list.data, vec![created]);
    }

    #[tokio::test]
    async fn unknown_status_segment_is_bad_request() {
        let (base, _state) = start().await;
        let resp = reqwest::get(format!("{base}/api/tasks/board/b1/status/BLOCKED"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn put_status_only_moves_task() {
        let (base, state) = start().await;
        let fields = taskboard_proto::task::TaskFields::new("A", "B", Status::Todo);
        let task = state
            .store
            .create(CreateTaskRequest::new(&fields, &BoardId::new("b1")))
            .await
            .unwrap();

        let resp = reqwest::Client::new()
            .put(format!("{base}/api/tasks/{}", task.id))
            .json(&json!({ "status": "DONE" }))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
        let updated: Task = resp.json().await.unwrap();
        assert_eq!(updated.status, Status::Done);
        assert_eq!(updated.description, "B");
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let (base, _state) = start().await;
        let resp = reqwest::Client::new()
            .delete(format!("{base}/api/tasks/nope"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_with_blank_title_is_unprocessable() {
        let (base, state) = start().await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/api/tasks"))
            .json(&json!({
                "title": "",
                "description": "",
                "status": "TODO",
                "boardId": "b1",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
        assert!(state.store.is_empty().await);
    }
}
