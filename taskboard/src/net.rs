//! Background sync tasks wired to the TUI.
//!
//! Bridges the synchronous TUI event loop (crossterm poll-based) with the
//! async [`SyncController`]. The main thread sends [`SyncCommand`]s and
//! drains [`SyncEvent`]s on each tick.
//!
//! ```text
//! TUI (main thread)  ←── SyncEvent ────  tokio tasks (one per command)
//!                     ─── SyncCommand →
//! ```
//!
//! Commands are not serialized: each one runs on its own task, so a slow
//! refetch never blocks the next user action. Ordering between overlapping
//! fetches is settled on the UI side by sequence number.

use std::sync::Arc;

use taskboard_proto::task::{BoardId, TaskFields, TaskId};
use tokio::sync::mpsc;
use url::Url;

use crate::api::TaskApi;
use crate::api::http::HttpTaskApi;
use crate::sync::{MoveIntent, SubmitId, SyncController, SyncEvent};

/// Commands sent from the TUI main loop to the sync tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncCommand {
    /// Refetch the whole board.
    FetchAll,
    /// Create a task from the form.
    Create {
        /// Token echoed back in the outcome event.
        submit: SubmitId,
        /// Submitted field values.
        fields: TaskFields,
    },
    /// Overwrite an existing task from the form.
    Update {
        /// Token echoed back in the outcome event.
        submit: SubmitId,
        /// Task being edited.
        task_id: TaskId,
        /// Submitted field values.
        fields: TaskFields,
    },
    /// Delete a task.
    Delete {
        /// Task to delete.
        task_id: TaskId,
    },
    /// Apply a drag-and-drop move.
    Move(MoveIntent),
    /// Stop accepting commands.
    Shutdown,
}

/// Configuration for the sync layer.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the task API.
    pub api_url: Url,
    /// Board to mirror.
    pub board_id: BoardId,
    /// Capacity of the command and event channels.
    pub channel_capacity: usize,
}

/// Spawns the sync tasks against the REST API and returns channel handles.
///
/// Must be called from within a tokio runtime. An initial
/// [`SyncCommand::FetchAll`] is issued before returning.
#[must_use]
pub fn spawn_sync(config: SyncConfig) -> (mpsc::Sender<SyncCommand>, mpsc::Receiver<SyncEvent>) {
    tracing::info!(api_url = %config.api_url, board_id = %config.board_id, "starting sync");
    let api = Arc::new(HttpTaskApi::new(config.api_url));
    spawn_sync_with(api, config.board_id, config.channel_capacity)
}

/// Spawns the sync tasks against any [`TaskApi`].
#[must_use]
pub fn spawn_sync_with<A: TaskApi + 'static>(
    api: Arc<A>,
    board_id: BoardId,
    channel_capacity: usize,
) -> (mpsc::Sender<SyncCommand>, mpsc::Receiver<SyncEvent>) {
    let capacity = channel_capacity.max(1);
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<SyncCommand>(capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<SyncEvent>(capacity);
    let controller = SyncController::new(api, board_id, evt_tx);

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            if cmd == SyncCommand::Shutdown {
                tracing::info!("sync shutting down");
                break;
            }
            let ctrl = controller.clone();
            tokio::spawn(async move { run_command(&ctrl, cmd).await });
        }
    });

    // Startup fetch. The fresh channel has room for at least one command.
    if cmd_tx.try_send(SyncCommand::FetchAll).is_err() {
        tracing::warn!("could not queue initial fetch");
    }

    (cmd_tx, evt_rx)
}

/// Executes one command. Failures were already reported as events.
async fn run_command<A: TaskApi + 'static>(ctrl: &SyncController<A>, cmd: SyncCommand) {
    tracing::debug!(?cmd, "running sync command");
    let result = match cmd {
        SyncCommand::FetchAll => ctrl.fetch_all_tasks().await.map(|_| ()),
        SyncCommand::Create { submit, fields } => ctrl.create_task(submit, &fields).await,
        SyncCommand::Update {
            submit,
            task_id,
            fields,
        } => ctrl.update_task(submit, &task_id, &fields).await,
        SyncCommand::Delete { task_id } => ctrl.delete_task(&task_id).await,
        SyncCommand::Move(intent) => ctrl.move_task(&intent).await,
        SyncCommand::Shutdown => Ok(()),
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, "sync command finished with error");
    }
}
