//! Sync controller: remote calls plus the refetch-after-write cycle.
//!
//! Every operation ends the same way. A mutation is sent to the server and,
//! if it succeeds, the whole board is fetched again (three per-status reads
//! in parallel) and handed to the UI as a [`SyncEvent::BoardFetched`]. Local
//! state is never patched, so a failed mutation has nothing to roll back.
//!
//! ```text
//! create/update/delete/move ──ok──► fetch_all_tasks ──► BoardFetched { seq, tasks }
//!            │                        ├─ TODO ─┐
//!            └─err──► MutationFailed  ├─ IN_PROGRESS ─┼─ concat in this order
//!                                     └─ DONE ─┘
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use taskboard_proto::api::{CreateTaskRequest, UpdateTaskRequest};
use taskboard_proto::task::{BoardId, Status, Task, TaskFields, TaskId};
use tokio::sync::mpsc;

use crate::api::{ApiError, TaskApi};

/// Message shown when the combined fetch itself breaks down.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch tasks";

/// The mutation a [`SyncEvent::MutationFailed`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    /// Task creation from the form.
    Create,
    /// Task edit from the form.
    Update,
    /// Task deletion.
    Delete,
    /// Status-only update from a card move.
    Move,
}

impl MutationOp {
    /// User-facing message for a failure of this operation.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Failed to create task",
            Self::Update => "Failed to update task",
            Self::Delete => "Failed to delete task",
            Self::Move => "Failed to update task status",
        }
    }
}

/// Identifies one form submission so its outcome reaches only that form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SubmitId(pub u64);

/// A card dropped on a column: the only data a move carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveIntent {
    /// The carried task.
    pub task_id: TaskId,
    /// Status of the column it was dropped on.
    pub target_status: Status,
}

/// Outcomes reported back to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A combined fetch completed; `seq` orders it against other fetches.
    BoardFetched {
        /// Monotonic fetch number.
        seq: u64,
        /// TODO tasks, then IN_PROGRESS, then DONE.
        tasks: Vec<Task>,
    },
    /// The combined fetch could not be orchestrated; the board is unusable.
    FetchFailed {
        /// Static user-facing message.
        message: String,
    },
    /// A mutation was rejected; the board stays as it was.
    MutationFailed {
        /// Which mutation failed.
        op: MutationOp,
        /// The form submission that failed, for creates and updates.
        submit: Option<SubmitId>,
        /// Static user-facing message.
        message: String,
    },
    /// A form submission (create or update) succeeded and the board was refetched.
    Saved {
        /// The submission that succeeded.
        submit: SubmitId,
    },
}

/// Errors returned by controller operations (already reported as events).
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A per-status fetch task panicked or was cancelled.
    #[error("combined fetch failed: {0}")]
    Orchestration(String),

    /// The server rejected a mutation or could not be reached.
    #[error("{op:?} failed: {source}")]
    Mutation {
        /// Which mutation.
        op: MutationOp,
        /// Underlying API error.
        source: ApiError,
    },
}

/// Drives the remote API and reports results as [`SyncEvent`]s.
pub struct SyncController<A> {
    api: Arc<A>,
    board_id: BoardId,
    seq: Arc<AtomicU64>,
    events: mpsc::Sender<SyncEvent>,
}

impl<A> Clone for SyncController<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            board_id: self.board_id.clone(),
            seq: Arc::clone(&self.seq),
            events: self.events.clone(),
        }
    }
}

/// Reads one status column, swallowing failures as an empty column.
async fn fetch_status<A: TaskApi>(api: &A, board_id: &BoardId, status: Status) -> Vec<Task> {
    match api.list_by_status(board_id, status).await {
        Ok(tasks) => {
            tracing::debug!(status = %status, count = tasks.len(), "fetched tasks");
            tasks
        }
        Err(e) => {
            tracing::warn!(status = %status, error = %e, "failed to fetch tasks for status");
            Vec::new()
        }
    }
}

impl<A: TaskApi + 'static> SyncController<A> {
    /// Creates a controller for `board_id` that reports on `events`.
    pub fn new(api: Arc<A>, board_id: BoardId, events: mpsc::Sender<SyncEvent>) -> Self {
        Self {
            api,
            board_id,
            seq: Arc::new(AtomicU64::new(0)),
            events,
        }
    }

    /// Fetches one status column. Failures are logged and yield an empty list.
    pub async fn fetch_tasks_by_status(&self, status: Status) -> Vec<Task> {
        fetch_status(self.api.as_ref(), &self.board_id, status).await
    }

    /// Fetches all three columns concurrently and publishes the merged list.
    ///
    /// The result is TODO tasks, then IN_PROGRESS, then DONE, stamped with a
    /// fresh sequence number. A column whose fetch fails is simply empty.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Orchestration`] (after emitting
    /// [`SyncEvent::FetchFailed`]) if a fetch task dies.
    pub async fn fetch_all_tasks(&self) -> Result<Vec<Task>, SyncError> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let handles = Status::ALL.map(|status| {
            let api = Arc::clone(&self.api);
            let board_id = self.board_id.clone();
            tokio::spawn(async move { fetch_status(api.as_ref(), &board_id, status).await })
        });

        let mut tasks = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(batch) => tasks.extend(batch),
                Err(e) => {
                    tracing::error!(seq, error = %e, "combined fetch failed");
                    self.emit(SyncEvent::FetchFailed {
                        message: FETCH_FAILED_MESSAGE.to_string(),
                    })
                    .await;
                    return Err(SyncError::Orchestration(e.to_string()));
                }
            }
        }

        tracing::info!(seq, count = tasks.len(), "board fetched");
        self.emit(SyncEvent::BoardFetched {
            seq,
            tasks: tasks.clone(),
        })
        .await;
        Ok(tasks)
    }

    /// Creates a task on the configured board, then refetches.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Mutation`] (after emitting
    /// [`SyncEvent::MutationFailed`]) if the server rejects the call.
    pub async fn create_task(&self, submit: SubmitId, fields: &TaskFields) -> Result<(), SyncError> {
        let req = CreateTaskRequest::new(fields, &self.board_id);
        let result = self.api.create(&req).await;
        self.after_mutation(MutationOp::Create, Some(submit), result).await?;
        self.emit(SyncEvent::Saved { submit }).await;
        Ok(())
    }

    /// Overwrites title, description and status of a task, then refetches.
    ///
    /// # Errors
    ///
    /// See [`create_task`](Self::create_task).
    pub async fn update_task(
        &self,
        submit: SubmitId,
        task_id: &TaskId,
        fields: &TaskFields,
    ) -> Result<(), SyncError> {
        let req = UpdateTaskRequest::from_fields(fields);
        let result = self.api.update(task_id, &req).await;
        self.after_mutation(MutationOp::Update, Some(submit), result).await?;
        self.emit(SyncEvent::Saved { submit }).await;
        Ok(())
    }

    /// Deletes a task, then refetches.
    ///
    /// # Errors
    ///
    /// See [`create_task`](Self::create_task).
    pub async fn delete_task(&self, task_id: &TaskId) -> Result<(), SyncError> {
        let result = self.api.delete(task_id).await;
        self.after_mutation(MutationOp::Delete, None, result).await
    }

    /// Applies a move intent as a status-only update, then refetches.
    ///
    /// # Errors
    ///
    /// See [`create_task`](Self::create_task).
    pub async fn move_task(&self, intent: &MoveIntent) -> Result<(), SyncError> {
        let req = UpdateTaskRequest::status_only(intent.target_status);
        let result = self.api.update(&intent.task_id, &req).await;
        self.after_mutation(MutationOp::Move, None, result).await
    }

    /// Reports a failed mutation, or refetches after a successful one.
    ///
    /// A refetch that itself fails has already been reported and does not
    /// turn the mutation into a failure.
    async fn after_mutation(
        &self,
        op: MutationOp,
        submit: Option<SubmitId>,
        result: Result<(), ApiError>,
    ) -> Result<(), SyncError> {
        if let Err(source) = result {
            tracing::error!(op = ?op, error = %source, "mutation failed");
            self.emit(SyncEvent::MutationFailed {
                op,
                submit,
                message: op.failure_message().to_string(),
            })
            .await;
            return Err(SyncError::Mutation { op, source });
        }
        tracing::info!(op = ?op, "mutation applied, refetching board");
        let _ = self.fetch_all_tasks().await;
        Ok(())
    }

    async fn emit(&self, event: SyncEvent) {
        if self.events.send(event).await.is_err() {
            tracing::debug!("sync event receiver dropped");
        }
    }
}
