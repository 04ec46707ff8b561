//! REST implementation of [`TaskApi`] over `reqwest`.

use taskboard_proto::api::{self, CreateTaskRequest, UpdateTaskRequest};
use taskboard_proto::codec;
use taskboard_proto::task::{BoardId, Status, Task, TaskId};
use url::Url;

use super::{ApiError, TaskApi};

/// HTTP client for the task API rooted at a base URL.
///
/// No timeouts and no retries are configured; a hung request simply never
/// completes.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTaskApi {
    /// Creates a client for the API served at `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Parses `base_url` and creates a client for it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Url`] if `base_url` is not an absolute URL.
    pub fn from_str_url(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self::new(Url::parse(base_url)?))
    }

    /// Absolute URL for an API route, keeping any path prefix of the base.
    ///
    /// Each segment is percent-encoded, so ids containing `/`, `?` or `#`
    /// stay inside their own segment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Url`] if the base URL cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn check(resp: reqwest::Response, path: &str) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            })
        }
    }
}

impl TaskApi for HttpTaskApi {
    async fn list_by_status(&self, board_id: &BoardId, status: Status) -> Result<Vec<Task>, ApiError> {
        let path = api::tasks_by_status_path(board_id, status);
        let url = self.endpoint(&api::tasks_by_status_segments(board_id, status))?;
        let resp = self.client.get(url).send().await?;
        let body = Self::check(resp, &path)?.bytes().await?;
        Ok(codec::decode_task_list(&body)?.data)
    }

    async fn create(&self, req: &CreateTaskRequest) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.endpoint(&api::TASKS_SEGMENTS)?)
            .json(req)
            .send()
            .await?;
        Self::check(resp, api::TASKS_PATH)?;
        Ok(())
    }

    async fn update(&self, task_id: &TaskId, req: &UpdateTaskRequest) -> Result<(), ApiError> {
        let path = api::task_path(task_id);
        let resp = self
            .client
            .put(self.endpoint(&api::task_segments(task_id))?)
            .json(req)
            .send()
            .await?;
        Self::check(resp, &path)?;
        Ok(())
    }

    async fn delete(&self, task_id: &TaskId) -> Result<(), ApiError> {
        let path = api::task_path(task_id);
        let url = self.endpoint(&api::task_segments(task_id))?;
        let resp = self.client.delete(url).send().await?;
        Self::check(resp, &path)?;
        Ok(())
    }
}
