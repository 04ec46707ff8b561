//! Task board domain types shared by the client and the API server.
//!
//! A [`Board`] is a flat, ordered list of [`Task`]s. Each task sits in
//! exactly one column, determined solely by its [`Status`]. Identifiers are
//! opaque strings assigned by the server; the client never mints them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque, server-assigned task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps an identifier string received from (or minted by) the server.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the board a task belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(String);

impl BoardId {
    /// Wraps a board identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Column a task lives in.
///
/// Serialized as the upper-case wire names `TODO`, `IN_PROGRESS`, `DONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Not started.
    Todo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl Status {
    /// All statuses in board column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Wire name, also used in request paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }

    /// Zero-based column position of this status.
    #[must_use]
    pub const fn column(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }

    /// Status of the column at `index`, if any.
    #[must_use]
    pub const fn from_column(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Todo),
            1 => Some(Self::InProgress),
            2 => Some(Self::Done),
            _ => None,
        }
    }

    /// Next status in column order, wrapping around.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Todo => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Todo,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the three wire status names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A task as returned by the server.
///
/// Unknown fields in the server's JSON are ignored. The description is
/// also read from the misspelled `discription` some servers emit; when both
/// keys are present, `description` wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TaskWire")]
pub struct Task {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Short title shown on the card.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Column the task belongs to.
    pub status: Status,
}

/// Incoming task JSON, before the two description spellings are merged.
#[derive(Deserialize)]
struct TaskWire {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    discription: Option<String>,
    status: Status,
}

impl From<TaskWire> for Task {
    fn from(wire: TaskWire) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            description: wire.description.or(wire.discription).unwrap_or_default(),
            status: wire.status,
        }
    }
}

/// The user-editable part of a task, as captured by the task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Target column.
    pub status: Status,
}

impl TaskFields {
    /// Convenience constructor.
    pub fn new(title: impl Into<String>, description: impl Into<String>, status: Status) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status,
        }
    }
}

/// The single board being visualized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Board identifier used in list requests.
    pub id: BoardId,
    /// Display name shown in the header.
    pub name: String,
    /// All tasks, in combined-fetch order.
    pub tasks: Vec<Task>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(id: BoardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Tasks whose status matches `status`, in board order.
    #[must_use]
    pub fn tasks_by_status(&self, status: Status) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }
}
