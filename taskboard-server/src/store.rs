//! In-memory task store backing the development API server.
//!
//! The [`TaskStore`] keeps every task of every board in one insertion-ordered
//! list. Identifiers are minted here (UUID v7), never by clients. State is
//! ephemeral and lost on restart.

use taskboard_proto::api::{CreateTaskRequest, UpdateTaskRequest};
use taskboard_proto::task::{BoardId, Status, Task, TaskId};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A task together with the board it was created on.
#[derive(Debug, Clone)]
pub struct StoredTask {
    /// Owning board.
    pub board_id: BoardId,
    /// The task as served to clients.
    pub task: Task,
}

/// Errors returned by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No task with the given identifier exists.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The request carried an empty title.
    #[error("task title cannot be empty")]
    EmptyTitle,
}

/// Insertion-ordered, thread-safe task list.
#[derive(Default)]
pub struct TaskStore {
    tasks: RwLock<Vec<StoredTask>>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks of `board_id` currently in `status`, oldest first.
    pub async fn list(&self, board_id: &BoardId, status: Status) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        tasks
            .iter()
            .filter(|s| s.board_id == *board_id && s.task.status == status)
            .map(|s| s.task.clone())
            .collect()
    }

    /// Creates a task and returns it with its new identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyTitle`] if the title is blank.
    pub async fn create(&self, req: CreateTaskRequest) -> Result<Task, StoreError> {
        if req.title.trim().is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let task = Task {
            id: TaskId::new(Uuid::now_v7().to_string()),
            title: req.title,
            description: req.description,
            status: req.status,
        };
        self.tasks.write().await.push(StoredTask {
            board_id: req.board_id,
            task: task.clone(),
        });
        Ok(task)
    }

    /// Applies the present fields of `req` to the task and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id, or
    /// [`StoreError::EmptyTitle`] if the update blanks the title.
    pub async fn update(&self, id: &TaskId, req: &UpdateTaskRequest) -> Result<Task, StoreError> {
        if req.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(StoreError::EmptyTitle);
        }
        let mut tasks = self.tasks.write().await;
        let stored = tasks
            .iter_mut()
            .find(|s| s.task.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        req.apply_to(&mut stored.task);
        Ok(stored.task.clone())
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().await;
        let idx = tasks
            .iter()
            .position(|s| s.task.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        tasks.remove(idx);
        drop(tasks);
        Ok(())
    }

    /// Total number of tasks across all boards.
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Whether the store holds no tasks.
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}
