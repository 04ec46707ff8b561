//! Application state and event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskboard_proto::task::{BoardId, Status, Task, TaskId};

use crate::board::BoardStore;
use crate::form::{FormField, ModalTrigger, TaskForm};
use crate::net::SyncCommand;
use crate::sync::{MoveIntent, SubmitId, SyncEvent};

/// A card being carried between columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    /// The drag payload: only the task identifier.
    pub task_id: TaskId,
    /// Column the card was picked up from.
    pub origin: Status,
    /// Column the card would land in if dropped now.
    pub over: Status,
}

/// Main application state.
pub struct App {
    /// Mirror of the server board.
    pub store: BoardStore,
    /// No combined fetch has completed yet.
    pub loading: bool,
    /// Set when the board could not be fetched at all; replaces the board.
    pub fatal_error: Option<String>,
    /// Last mutation failure, shown alongside the board until dismissed.
    pub error: Option<String>,
    /// Column with the selection cursor.
    pub selected_status: Status,
    /// Index of the selected card within the selected column.
    pub selected_task: usize,
    /// Open create/edit form, if any.
    pub modal: Option<TaskForm>,
    /// Card currently being carried, if any.
    pub drag: Option<DragState>,
    /// Last submission token handed to a form.
    last_submit: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the app in its loading state for the given board.
    #[must_use]
    pub fn new(board_id: BoardId, board_name: impl Into<String>) -> Self {
        Self {
            store: BoardStore::new(board_id, board_name),
            loading: true,
            fatal_error: None,
            error: None,
            selected_status: Status::Todo,
            selected_task: 0,
            modal: None,
            drag: None,
            last_submit: 0,
            should_quit: false,
        }
    }

    /// Applies an event from the sync layer.
    pub fn apply_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::BoardFetched { seq, tasks } => {
                if self.store.replace_tasks(seq, tasks) {
                    self.loading = false;
                    self.clamp_selection();
                    if let Some(drag) = &self.drag
                        && self.store.find(&drag.task_id).is_none()
                    {
                        self.drag = None;
                    }
                }
            }
            SyncEvent::FetchFailed { message } => {
                self.loading = false;
                self.fatal_error = Some(message);
            }
            SyncEvent::MutationFailed {
                submit, message, ..
            } => {
                if let (Some(submit), Some(form)) = (submit, &mut self.modal)
                    && form.awaits(submit)
                {
                    form.pending = None;
                }
                self.error = Some(message);
            }
            SyncEvent::Saved { submit } => {
                if self.modal.as_ref().is_some_and(|f| f.awaits(submit)) {
                    self.modal = None;
                }
            }
        }
    }

    /// Records that a command never reached the sync tasks.
    ///
    /// Unlocks a saving form so the user can retry.
    pub fn command_not_sent(&mut self, message: &str) {
        if let Some(form) = &mut self.modal {
            form.pending = None;
        }
        self.error = Some(message.to_string());
    }

    /// Handles a key press. Returns a command when the action needs the server.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        if self.modal.is_some() {
            return self.handle_form_key(key);
        }

        if self.loading || self.fatal_error.is_some() {
            if key.code == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return None;
        }

        self.handle_board_key(key)
    }

    fn handle_board_key(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.drag.take().is_none() {
                    self.error = None;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.step_column(false),
            KeyCode::Right | KeyCode::Char('l') => self.step_column(true),
            KeyCode::Up | KeyCode::Char('k') if self.drag.is_none() => {
                self.selected_task = self.selected_task.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') if self.drag.is_none() => {
                let len = self.store.tasks_by_status(self.selected_status).len();
                if self.selected_task + 1 < len {
                    self.selected_task += 1;
                }
            }
            KeyCode::Char('a') if self.drag.is_none() => {
                self.open_form(ModalTrigger::Create {
                    status: self.selected_status,
                });
            }
            KeyCode::Char('n') if self.drag.is_none() => {
                self.open_form(ModalTrigger::Create {
                    status: Status::Todo,
                });
            }
            KeyCode::Char('m' | ' ') | KeyCode::Enter if self.drag.is_some() => {
                return self.drop_card();
            }
            KeyCode::Char('m' | ' ') => self.pick_up(),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(task) = self.current_task().cloned() {
                    self.open_form(ModalTrigger::Edit { task });
                }
            }
            KeyCode::Char('d') if self.drag.is_none() => {
                return self.current_task().map(|t| SyncCommand::Delete {
                    task_id: t.id.clone(),
                });
            }
            _ => {}
        }
        None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        if key.code == KeyCode::Esc {
            self.modal = None;
            return None;
        }
        let submit = SubmitId(self.last_submit + 1);
        let form = self.modal.as_mut()?;
        if form.is_saving() {
            return None;
        }
        match key.code {
            KeyCode::Enter => {
                let cmd = form.submit(submit);
                if cmd.is_some() {
                    self.last_submit = submit.0;
                }
                return cmd;
            }
            KeyCode::Tab => form.focus = form.focus.next(),
            KeyCode::BackTab => form.focus = form.focus.prev(),
            KeyCode::Left if form.focus == FormField::Status => {
                form.status = form.status.cycle().cycle();
            }
            KeyCode::Right | KeyCode::Char(' ') if form.focus == FormField::Status => {
                form.status = form.status.cycle();
            }
            code => {
                if let Some(input) = form.focused_input() {
                    match code {
                        KeyCode::Char(c) => input.insert(c),
                        KeyCode::Backspace => input.backspace(),
                        KeyCode::Delete => input.delete(),
                        KeyCode::Left => input.move_left(),
                        KeyCode::Right => input.move_right(),
                        KeyCode::Home => input.home(),
                        KeyCode::End => input.end(),
                        _ => {}
                    }
                }
            }
        }
        None
    }

    /// The card under the selection cursor.
    #[must_use]
    pub fn current_task(&self) -> Option<&Task> {
        self.store
            .tasks_by_status(self.selected_status)
            .get(self.selected_task)
            .copied()
    }

    fn open_form(&mut self, trigger: ModalTrigger) {
        tracing::debug!(?trigger, "opening task form");
        self.modal = Some(TaskForm::open(trigger));
    }

    fn step_column(&mut self, forward: bool) {
        let from = self
            .drag
            .as_ref()
            .map_or(self.selected_status, |d| d.over)
            .column();
        let to = if forward {
            from + 1
        } else {
            from.saturating_sub(1)
        };
        let Some(status) = Status::from_column(to) else {
            return;
        };
        match &mut self.drag {
            Some(drag) => drag.over = status,
            None => {
                self.selected_status = status;
                self.clamp_selection();
            }
        }
    }

    fn pick_up(&mut self) {
        let drag = self.current_task().map(|task| DragState {
            task_id: task.id.clone(),
            origin: task.status,
            over: task.status,
        });
        if let Some(drag) = drag {
            tracing::debug!(task_id = %drag.task_id, "card picked up");
            self.drag = Some(drag);
        }
    }

    fn drop_card(&mut self) -> Option<SyncCommand> {
        let drag = self.drag.take()?;
        self.selected_status = drag.over;
        self.clamp_selection();
        Some(SyncCommand::Move(MoveIntent {
            task_id: drag.task_id,
            target_status: drag.over,
        }))
    }

    fn clamp_selection(&mut self) {
        let len = self.store.tasks_by_status(self.selected_status).len();
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
    }
}
