//! Create/edit task form state.
//!
//! The form is opened with a [`ModalTrigger`]: either a target status
//! (create) or an existing task (edit). The trigger decides the initial
//! field values and which remote call a submit turns into.

use taskboard_proto::task::{Status, Task, TaskFields, TaskId};

use crate::net::SyncCommand;
use crate::sync::SubmitId;

/// A single-line text input with a character-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
    /// Cursor position in chars, `0..=value.chars().count()`.
    cursor: usize,
}

impl InputField {
    /// Creates an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a field holding `value` with the cursor at the end.
    #[must_use]
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    /// Current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in chars.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Inserts a character at the cursor.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub const fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }
}

/// What opened the form. Exactly one of a pending status or a pending task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalTrigger {
    /// New task in the given column.
    Create {
        /// Initial status for the new task.
        status: Status,
    },
    /// Edit an existing task.
    Edit {
        /// Snapshot of the task when the form was opened.
        task: Task,
    },
}

/// Whether a submit creates or updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(TaskId),
}

/// Focusable form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Status,
}

impl FormField {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Status,
            Self::Status => Self::Title,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Status,
            Self::Description => Self::Title,
            Self::Status => Self::Description,
        }
    }
}

/// Open form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub mode: FormMode,
    pub title: InputField,
    pub description: InputField,
    pub status: Status,
    pub focus: FormField,
    /// Submission in flight; further submits are ignored until it resolves.
    pub pending: Option<SubmitId>,
}

impl TaskForm {
    /// Opens a form for `trigger`, pre-filled in edit mode and empty otherwise.
    #[must_use]
    pub fn open(trigger: ModalTrigger) -> Self {
        match trigger {
            ModalTrigger::Create { status } => Self {
                mode: FormMode::Create,
                title: InputField::new(),
                description: InputField::new(),
                status,
                focus: FormField::Title,
                pending: None,
            },
            ModalTrigger::Edit { task } => Self {
                mode: FormMode::Edit(task.id),
                title: InputField::with_value(&task.title),
                description: InputField::with_value(&task.description),
                status: task.status,
                focus: FormField::Title,
                pending: None,
            },
        }
    }

    /// Heading shown on the modal border.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Task",
            FormMode::Edit(_) => "Edit Task",
        }
    }

    /// Current field values.
    #[must_use]
    pub fn fields(&self) -> TaskFields {
        TaskFields::new(self.title.value(), self.description.value(), self.status)
    }

    /// The text field with focus, if the focus is on one.
    pub const fn focused_input(&mut self) -> Option<&mut InputField> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Status => None,
        }
    }

    /// Whether a submit is awaiting its outcome.
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether `submit` is the submission this form is waiting on.
    #[must_use]
    pub fn awaits(&self, submit: SubmitId) -> bool {
        self.pending == Some(submit)
    }

    /// Builds the command for a submit tagged with `submit`, marking the form as saving.
    ///
    /// Returns `None` when the title is blank or a save is already in flight.
    pub fn submit(&mut self, submit: SubmitId) -> Option<SyncCommand> {
        if self.is_saving() || self.title.value().trim().is_empty() {
            return None;
        }
        self.pending = Some(submit);
        let fields = self.fields();
        Some(match &self.mode {
            FormMode::Create => SyncCommand::Create { submit, fields },
            FormMode::Edit(task_id) => SyncCommand::Update {
                submit,
                task_id: task_id.clone(),
                fields,
            },
        })
    }
}
