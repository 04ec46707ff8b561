//! In-process [`TaskApi`] for tests.
//!
//! Behaves like the REST backend (server-assigned ids, insertion order,
//! 404 on unknown ids) and adds knobs to make individual calls fail, panic
//! or lag so the sync controller's failure paths can be exercised without
//! a network.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use parking_lot::Mutex;
use taskboard_proto::api::{CreateTaskRequest, UpdateTaskRequest};
use taskboard_proto::task::{BoardId, Status, Task, TaskId};

use super::{ApiError, TaskApi};

/// A call observed by the in-memory backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `GET .../status/{status}`.
    List(Status),
    /// `POST /api/tasks`.
    Create(CreateTaskRequest),
    /// `PUT /api/tasks/{id}`.
    Update(TaskId, UpdateTaskRequest),
    /// `DELETE /api/tasks/{id}`.
    Delete(TaskId),
}

#[derive(Default)]
struct Inner {
    tasks: Vec<(BoardId, Task)>,
    next_id: u64,
    calls: Vec<ApiCall>,
    failing_statuses: HashSet<Status>,
    panicking_statuses: HashSet<Status>,
    latency: HashMap<Status, Duration>,
    fail_mutations: bool,
}

/// Thread-safe in-memory task backend.
#[derive(Default)]
pub struct InMemoryTaskApi {
    inner: Mutex<Inner>,
}

impl InMemoryTaskApi {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a task directly, bypassing the call log. Returns its id.
    pub fn seed(&self, board_id: &BoardId, title: &str, status: Status) -> TaskId {
        let mut inner = self.inner.lock();
        let id = Self::mint_id(&mut inner);
        inner.tasks.push((
            board_id.clone(),
            Task {
                id: id.clone(),
                title: title.to_string(),
                description: String::new(),
                status,
            },
        ));
        id
    }

    /// Makes every list call for `status` fail until cleared.
    pub fn fail_status(&self, status: Status, fail: bool) {
        let mut inner = self.inner.lock();
        if fail {
            inner.failing_statuses.insert(status);
        } else {
            inner.failing_statuses.remove(&status);
        }
    }

    /// Makes list calls for `status` panic, simulating a crashed fetch task.
    pub fn panic_on_status(&self, status: Status) {
        self.inner.lock().panicking_statuses.insert(status);
    }

    /// Delays list calls for `status` by `delay`.
    pub fn set_latency(&self, status: Status, delay: Duration) {
        self.inner.lock().latency.insert(status, delay);
    }

    /// Makes every create/update/delete fail until cleared.
    pub fn fail_mutations(&self, fail: bool) {
        self.inner.lock().fail_mutations = fail;
    }

    /// Every call received so far, in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.inner.lock().calls.clone()
    }

    /// Snapshot of all stored tasks regardless of board.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.inner.lock().tasks.iter().map(|(_, t)| t.clone()).collect()
    }

    fn mint_id(inner: &mut Inner) -> TaskId {
        inner.next_id += 1;
        TaskId::new(format!("task-{}", inner.next_id))
    }

    fn mutation_gate(inner: &mut Inner, call: ApiCall) -> Result<(), ApiError> {
        inner.calls.push(call);
        if inner.fail_mutations {
            return Err(ApiError::Unavailable("mutations disabled".to_string()));
        }
        Ok(())
    }

    fn not_found(task_id: &TaskId) -> ApiError {
        ApiError::Status {
            status: 404,
            path: taskboard_proto::api::task_path(task_id),
        }
    }
}

impl TaskApi for InMemoryTaskApi {
    async fn list_by_status(&self, board_id: &BoardId, status: Status) -> Result<Vec<Task>, ApiError> {
        let delay = {
            let mut inner = self.inner.lock();
            inner.calls.push(ApiCall::List(status));
            inner.latency.get(&status).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let inner = self.inner.lock();
        if inner.panicking_statuses.contains(&status) {
            drop(inner);
            panic!("simulated crash while listing {status}");
        }
        if inner.failing_statuses.contains(&status) {
            return Err(ApiError::Unavailable(format!("listing {status} disabled")));
        }
        Ok(inner
            .tasks
            .iter()
            .filter(|(b, t)| b == board_id && t.status == status)
            .map(|(_, t)| t.clone())
            .collect())
    }

    async fn create(&self, req: &CreateTaskRequest) -> Result<(), ApiError> {
        let mut inner = self.inner.lock();
        Self::mutation_gate(&mut inner, ApiCall::Create(req.clone()))?;
        let id = Self::mint_id(&mut inner);
        inner.tasks.push((
            req.board_id.clone(),
            Task {
                id,
                title: req.title.clone(),
                description: req.description.clone(),
                status: req.status,
            },
        ));
        Ok(())
    }

    async fn update(&self, task_id: &TaskId, req: &UpdateTaskRequest) -> Result<(), ApiError> {
        let mut inner = self.inner.lock();
        Self::mutation_gate(&mut inner, ApiCall::Update(task_id.clone(), req.clone()))?;
        let (_, task) = inner
            .tasks
            .iter_mut()
            .find(|(_, t)| t.id == *task_id)
            .ok_or_else(|| Self::not_found(task_id))?;
        req.apply_to(task);
        Ok(())
    }

    async fn delete(&self, task_id: &TaskId) -> Result<(), ApiError> {
        let mut inner = self.inner.lock();
        Self::mutation_gate(&mut inner, ApiCall::Delete(task_id.clone()))?;
        let idx = inner
            .tasks
            .iter()
            .position(|(_, t)| t.id == *task_id)
            .ok_or_else(|| Self::not_found(task_id))?;
        inner.tasks.remove(idx);
        Ok(())
    }
}
