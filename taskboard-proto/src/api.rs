//! REST API request/response bodies and route paths.
//!
//! ```text
//! GET    /api/tasks/board/{boardId}/status/{status}  -> { "data": [Task] }
//! POST   /api/tasks          { title, description, status, boardId }
//! PUT    /api/tasks/{taskId} { title?, description?, status? }
//! DELETE /api/tasks/{taskId}
//! ```

use serde::{Deserialize, Serialize};

use crate::task::{BoardId, Status, Task, TaskFields, TaskId};

/// Root of all task routes.
pub const TASKS_PATH: &str = "/api/tasks";

/// Segments of [`TASKS_PATH`].
pub const TASKS_SEGMENTS: [&str; 2] = ["api", "tasks"];

/// Path listing one board's tasks in one status.
///
/// Ids are inserted verbatim; use [`tasks_by_status_segments`] to build a
/// request URL.
#[must_use]
pub fn tasks_by_status_path(board_id: &BoardId, status: Status) -> String {
    format!("{TASKS_PATH}/board/{board_id}/status/{status}")
}

/// Path addressing a single task, for logs and error messages.
#[must_use]
pub fn task_path(task_id: &TaskId) -> String {
    format!("{TASKS_PATH}/{task_id}")
}

/// Unencoded path segments listing one board's tasks in one status.
#[must_use]
pub fn tasks_by_status_segments(board_id: &BoardId, status: Status) -> [&str; 6] {
    let [api, tasks] = TASKS_SEGMENTS;
    [api, tasks, "board", board_id.as_str(), "status", status.as_str()]
}

/// Unencoded path segments addressing a single task.
#[must_use]
pub fn task_segments(task_id: &TaskId) -> [&str; 3] {
    let [api, tasks] = TASKS_SEGMENTS;
    [api, tasks, task_id.as_str()]
}

/// Envelope wrapping a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListResponse {
    /// Tasks in server order.
    pub data: Vec<Task>,
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Initial column.
    pub status: Status,
    /// Board the task is created on.
    pub board_id: BoardId,
}

impl CreateTaskRequest {
    /// Builds a create body from form fields for the given board.
    #[must_use]
    pub fn new(fields: &TaskFields, board_id: &BoardId) -> Self {
        Self {
            title: fields.title.clone(),
            description: fields.description.clone(),
            status: fields.status,
            board_id: board_id.clone(),
        }
    }
}

/// Body of `PUT /api/tasks/{taskId}`.
///
/// Every field is optional; absent fields are left out of the JSON entirely
/// so the server only touches what was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl UpdateTaskRequest {
    /// Full update carrying all three editable fields.
    #[must_use]
    pub fn from_fields(fields: &TaskFields) -> Self {
        Self {
            title: Some(fields.title.clone()),
            description: Some(fields.description.clone()),
            status: Some(fields.status),
        }
    }

    /// Status-only update, as issued by a card move.
    #[must_use]
    pub const fn status_only(status: Status) -> Self {
        Self {
            title: None,
            description: None,
            status: Some(status),
        }
    }

    /// Applies the present fields onto `task`.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            task.description.clone_from(description);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_path_uses_wire_status() {
        let path = tasks_by_status_path(&BoardId::new("b-1"), Status::InProgress);
        assert_eq!(path, "/api/tasks/board/b-1/status/IN_PROGRESS");
    }

    #[test]
    fn task_path_appends_id() {
        assert_eq!(task_path(&TaskId::new("abc")), "/api/tasks/abc");
    }

    #[test]
    fn segments_match_paths() {
        let board = BoardId::new("b-1");
        assert_eq!(
            format!("/{}", tasks_by_status_segments(&board, Status::Done).join("/")),
            tasks_by_status_path(&board, Status::Done)
        );
        let id = TaskId::new("abc");
        assert_eq!(format!("/{}", task_segments(&id).join("/")), task_path(&id));
    }

    #[test]
    fn create_body_uses_camel_case_board_id() {
        let fields = TaskFields::new("A", "B", Status::Todo);
        let body = CreateTaskRequest::new(&fields, &BoardId::new("b-1"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "A",
                "description": "B",
                "status": "TODO",
                "boardId": "b-1",
            })
        );
    }

    #[test]
    fn status_only_update_omits_other_fields() {
        let json = serde_json::to_value(UpdateTaskRequest::status_only(Status::Done)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "DONE" }));
    }

    #[test]
    fn full_update_sends_all_fields() {
        let fields = TaskFields::new("T", "D", Status::InProgress);
        let json = serde_json::to_value(UpdateTaskRequest::from_fields(&fields)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "title": "T", "description": "D", "status": "IN_PROGRESS" })
        );
    }

    #[test]
    fn apply_to_touches_only_present_fields() {
        let mut task = Task {
            id: TaskId::new("1"),
            title: "old".to_string(),
            description: "keep".to_string(),
            status: Status::Todo,
        };
        let update = UpdateTaskRequest {
            title: Some("new".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut task);
        assert_eq!(task.title, "new");
        assert_eq!(task.description, "keep");
        assert_eq!(task.status, Status::Todo);
    }

    #[test]
    fn list_response_parses_data_envelope() {
        let json = r#"{"data":[{"id":"1","title":"A","description":"B","status":"TODO"}]}"#;
        let resp: TaskListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data.len(), 1);
        assert_eq!(resp.data[0].title, "A");
    }
}
