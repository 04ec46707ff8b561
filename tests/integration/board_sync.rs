//! Integration tests for board sync over HTTP.
//!
//! Runs `taskboard-server` in-process on an ephemeral port and drives it
//! through `HttpTaskApi` + `SyncController`, the same stack the TUI uses.
//!
//! These tests validate:
//! - The combined fetch returns TODO, IN_PROGRESS, DONE in that order
//! - Create, update, move and delete are visible after the refetch
//! - Server-side failures surface as operation-specific messages

use std::sync::Arc;

use taskboard::api::TaskApi;
use taskboard::api::http::HttpTaskApi;
use taskboard::sync::{MoveIntent, MutationOp, SubmitId, SyncController, SyncEvent};
use taskboard_proto::api::CreateTaskRequest;
use taskboard_proto::task::{BoardId, Status, TaskFields, TaskId};
use tokio::sync::mpsc;

/// Start the API server in-process and return its base URL.
async fn start_api() -> (String, tokio::task::JoinHandle<()>) {
    let (addr, handle) = taskboard_server::server::start_server("127.0.0.1:0")
        .await
        .expect("failed to start api server");
    (format!("http://{addr}"), handle)
}

fn board() -> BoardId {
    BoardId::new("32c69b32-b687-491b-80f4-43ce74dd0449")
}

fn controller(
    base_url: &str,
) -> (
    Arc<HttpTaskApi>,
    SyncController<HttpTaskApi>,
    mpsc::Receiver<SyncEvent>,
) {
    let api = Arc::new(HttpTaskApi::from_str_url(base_url).expect("valid url"));
    let (tx, rx) = mpsc::channel(32);
    let ctrl = SyncController::new(Arc::clone(&api), board(), tx);
    (api, ctrl, rx)
}

async fn seed(api: &HttpTaskApi, title: &str, status: Status) {
    api.create(&CreateTaskRequest::new(
        &TaskFields::new(title, "", status),
        &board(),
    ))
    .await
    .expect("seed create");
}

// =============================================================================
// Combined fetch
// =============================================================================

#[tokio::test]
async fn combined_fetch_orders_columns() {
    let (url, _handle) = start_api().await;
    let (api, ctrl, _rx) = controller(&url);

    seed(&api, "done", Status::Done).await;
    seed(&api, "doing", Status::InProgress).await;
    seed(&api, "todo-a", Status::Todo).await;
    seed(&api, "todo-b", Status::Todo).await;

    let tasks = ctrl.fetch_all_tasks().await.expect("fetch");
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["todo-a", "todo-b", "doing", "done"]);
}

#[tokio::test]
async fn other_boards_are_not_shown() {
    let (url, _handle) = start_api().await;
    let (api, ctrl, _rx) = controller(&url);

    api.create(&CreateTaskRequest::new(
        &TaskFields::new("elsewhere", "", Status::Todo),
        &BoardId::new("another-board"),
    ))
    .await
    .expect("create on other board");

    assert!(ctrl.fetch_all_tasks().await.expect("fetch").is_empty());
}

#[tokio::test]
async fn unreachable_server_yields_empty_board_not_fatal_error() {
    let (_api, ctrl, mut rx) = controller("http://127.0.0.1:9");

    let tasks = ctrl.fetch_all_tasks().await.expect("per-status failures are swallowed");
    assert!(tasks.is_empty());
    assert!(matches!(rx.recv().await, Some(SyncEvent::BoardFetched { .. })));
}

// =============================================================================
// Mutations followed by refetch
// =============================================================================

#[tokio::test]
async fn create_is_visible_after_refetch() {
    let (url, _handle) = start_api().await;
    let (_api, ctrl, mut rx) = controller(&url);

    ctrl.create_task(SubmitId(1), &TaskFields::new("A", "B", Status::Todo))
        .await
        .expect("create");

    let Some(SyncEvent::BoardFetched { tasks, .. }) = rx.recv().await else {
        panic!("expected BoardFetched after create");
    };
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "A");
    assert_eq!(tasks[0].description, "B");
    assert_eq!(tasks[0].status, Status::Todo);
    assert!(!tasks[0].id.as_str().is_empty(), "server assigns an id");
    assert_eq!(rx.recv().await, Some(SyncEvent::Saved { submit: SubmitId(1) }));
}

#[tokio::test]
async fn move_todo_to_done() {
    let (url, _handle) = start_api().await;
    let (api, ctrl, _rx) = controller(&url);
    seed(&api, "card", Status::Todo).await;
    let id = ctrl.fetch_all_tasks().await.expect("fetch")[0].id.clone();

    ctrl.move_task(&MoveIntent {
        task_id: id.clone(),
        target_status: Status::Done,
    })
    .await
    .expect("move");

    let todo = ctrl.fetch_tasks_by_status(Status::Todo).await;
    let done = ctrl.fetch_tasks_by_status(Status::Done).await;
    assert!(todo.iter().all(|t| t.id != id));
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, id);
    assert_eq!(done[0].title, "card", "status-only update keeps other fields");
}

#[tokio::test]
async fn update_overwrites_fields() {
    let (url, _handle) = start_api().await;
    let (api, ctrl, _rx) = controller(&url);
    seed(&api, "draft", Status::Todo).await;
    let id = ctrl.fetch_all_tasks().await.expect("fetch")[0].id.clone();

    ctrl.update_task(
        SubmitId(1),
        &id,
        &TaskFields::new("final", "notes", Status::InProgress),
    )
    .await
    .expect("update");

    let doing = ctrl.fetch_tasks_by_status(Status::InProgress).await;
    assert_eq!(doing.len(), 1);
    assert_eq!(doing[0].title, "final");
    assert_eq!(doing[0].description, "notes");
}

#[tokio::test]
async fn delete_removes_from_every_refetch() {
    let (url, _handle) = start_api().await;
    let (api, ctrl, _rx) = controller(&url);
    seed(&api, "keep", Status::Todo).await;
    seed(&api, "drop", Status::Done).await;
    let doomed = ctrl.fetch_tasks_by_status(Status::Done).await[0].id.clone();

    ctrl.delete_task(&doomed).await.expect("delete");

    for _ in 0..2 {
        let tasks = ctrl.fetch_all_tasks().await.expect("fetch");
        assert_eq!(tasks.len(), 1);
        assert!(tasks.iter().all(|t| t.id != doomed));
    }
}

#[tokio::test]
async fn unknown_task_reports_operation_message() {
    let (url, _handle) = start_api().await;
    let (_api, ctrl, mut rx) = controller(&url);
    let ghost = TaskId::new("does-not-exist");

    assert!(ctrl.delete_task(&ghost).await.is_err());
    assert_eq!(
        rx.recv().await,
        Some(SyncEvent::MutationFailed {
            op: MutationOp::Delete,
            submit: None,
            message: "Failed to delete task".to_string(),
        })
    );

    assert!(
        ctrl.move_task(&MoveIntent {
            task_id: ghost,
            target_status: Status::Done,
        })
        .await
        .is_err()
    );
    assert_eq!(
        rx.recv().await,
        Some(SyncEvent::MutationFailed {
            op: MutationOp::Move,
            submit: None,
            message: "Failed to update task status".to_string(),
        })
    );
}

#[tokio::test]
async fn blank_title_create_is_rejected() {
    let (url, _handle) = start_api().await;
    let (api, ctrl, mut rx) = controller(&url);

    // The server refuses blank titles with 422.
    assert!(
        ctrl.create_task(SubmitId(3), &TaskFields::new("  ", "", Status::Todo))
            .await
            .is_err()
    );
    assert_eq!(
        rx.recv().await,
        Some(SyncEvent::MutationFailed {
            op: MutationOp::Create,
            submit: Some(SubmitId(3)),
            message: "Failed to create task".to_string(),
        })
    );
    assert!(rx.try_recv().is_err(), "no refetch and no Saved after a failure");
    assert!(api.list_by_status(&board(), Status::Todo).await.expect("list").is_empty());
}
