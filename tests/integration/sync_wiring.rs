//! Integration tests for the TUI ↔ sync wiring.
//!
//! Exercises `net::spawn_sync` against an in-process API server and feeds
//! the resulting events through `App`, the way the main loop does.
//!
//! These tests validate:
//! - The initial fetch arrives without any command being sent
//! - A form submit becomes a create, a refetch and a `Saved` that closes the form
//! - A drag-and-drop becomes a move that is reflected on the board
//! - A backend crash in one fetch task surfaces as the fatal error screen

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskboard::api::memory::InMemoryTaskApi;
use taskboard::app::App;
use taskboard::net::{self, SyncCommand, SyncConfig};
use taskboard::sync::SyncEvent;
use taskboard_proto::task::{BoardId, Status};
use tokio::sync::mpsc;
use url::Url;

async fn start_api() -> (Url, tokio::task::JoinHandle<()>) {
    let (addr, handle) = taskboard_server::server::start_server("127.0.0.1:0")
        .await
        .expect("failed to start api server");
    let url = Url::parse(&format!("http://{addr}")).expect("valid url");
    (url, handle)
}

fn board() -> BoardId {
    BoardId::new("wiring-board")
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Wait for the next event and apply it to the app.
async fn pump(app: &mut App, rx: &mut mpsc::Receiver<SyncEvent>) -> SyncEvent {
    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timeout waiting for sync event")
        .expect("event channel closed");
    app.apply_event(event.clone());
    event
}

#[tokio::test]
async fn initial_fetch_ends_loading() {
    let (url, _handle) = start_api().await;
    let (_tx, mut rx) = net::spawn_sync(SyncConfig {
        api_url: url,
        board_id: board(),
        channel_capacity: 8,
    });
    let mut app = App::new(board(), "Main Board");
    assert!(app.loading);

    let event = pump(&mut app, &mut rx).await;
    assert!(matches!(event, SyncEvent::BoardFetched { seq: 1, .. }));
    assert!(!app.loading);
    assert!(app.store.tasks().is_empty());
}

#[tokio::test]
async fn form_submit_creates_task_and_closes_form() {
    let (url, _handle) = start_api().await;
    let (tx, mut rx) = net::spawn_sync(SyncConfig {
        api_url: url,
        board_id: board(),
        channel_capacity: 8,
    });
    let mut app = App::new(board(), "Main Board");
    pump(&mut app, &mut rx).await;

    app.handle_key_event(key(KeyCode::Char('n')));
    for c in "Write tests".chars() {
        app.handle_key_event(key(KeyCode::Char(c)));
    }
    let cmd = app.handle_key_event(key(KeyCode::Enter)).expect("submit command");
    let SyncCommand::Create { submit, .. } = &cmd else {
        panic!("expected a create command, got {cmd:?}");
    };
    let submit = *submit;
    tx.send(cmd).await.expect("send");

    assert!(matches!(
        pump(&mut app, &mut rx).await,
        SyncEvent::BoardFetched { .. }
    ));
    assert_eq!(pump(&mut app, &mut rx).await, SyncEvent::Saved { submit });
    assert!(app.modal.is_none());
    assert_eq!(app.store.tasks_by_status(Status::Todo).len(), 1);
    assert_eq!(app.store.tasks()[0].title, "Write tests");
}

#[tokio::test]
async fn drag_and_drop_moves_card() {
    let api = Arc::new(InMemoryTaskApi::new());
    api.seed(&board(), "card", Status::Todo);
    let (tx, mut rx) = net::spawn_sync_with(Arc::clone(&api), board(), 8);
    let mut app = App::new(board(), "Main Board");
    pump(&mut app, &mut rx).await;

    app.handle_key_event(key(KeyCode::Char('m')));
    app.handle_key_event(key(KeyCode::Right));
    let cmd = app.handle_key_event(key(KeyCode::Char('m'))).expect("move command");
    assert!(matches!(cmd, SyncCommand::Move(_)));
    tx.send(cmd).await.expect("send");

    pump(&mut app, &mut rx).await;
    assert!(app.store.tasks_by_status(Status::Todo).is_empty());
    assert_eq!(app.store.tasks_by_status(Status::InProgress).len(), 1);
}

#[tokio::test]
async fn crashed_fetch_shows_fatal_error() {
    let api = Arc::new(InMemoryTaskApi::new());
    api.panic_on_status(Status::InProgress);
    let (_tx, mut rx) = net::spawn_sync_with(api, board(), 8);
    let mut app = App::new(board(), "Main Board");

    pump(&mut app, &mut rx).await;
    assert_eq!(app.fatal_error.as_deref(), Some("Failed to fetch tasks"));
    assert!(!app.loading);
}

#[tokio::test]
async fn failed_move_keeps_board_and_sets_banner() {
    let api = Arc::new(InMemoryTaskApi::new());
    api.seed(&board(), "card", Status::Todo);
    let (tx, mut rx) = net::spawn_sync_with(Arc::clone(&api), board(), 8);
    let mut app = App::new(board(), "Main Board");
    pump(&mut app, &mut rx).await;

    api.fail_mutations(true);
    app.handle_key_event(key(KeyCode::Char('m')));
    app.handle_key_event(key(KeyCode::Right));
    let cmd = app.handle_key_event(key(KeyCode::Enter)).expect("move command");
    tx.send(cmd).await.expect("send");

    pump(&mut app, &mut rx).await;
    assert_eq!(app.error.as_deref(), Some("Failed to update task status"));
    assert!(app.fatal_error.is_none());
    assert_eq!(app.store.tasks_by_status(Status::Todo).len(), 1);
}
