//! Board state store.
//!
//! Holds the single board the client mirrors. The only mutation is a
//! wholesale replacement of the task list with the result of a combined
//! fetch; nothing is ever patched in place and nothing is validated.

use taskboard_proto::task::{Board, BoardId, Status, Task, TaskId};

/// The client's in-memory mirror of the server board.
#[derive(Debug, Clone)]
pub struct BoardStore {
    board: Board,
    /// Sequence number of the combined fetch currently shown (0 = none yet).
    applied_seq: u64,
}

impl BoardStore {
    /// Creates an empty store for the given board.
    pub fn new(board_id: BoardId, name: impl Into<String>) -> Self {
        Self {
            board: Board::new(board_id, name),
            applied_seq: 0,
        }
    }

    /// Replaces the task list with the result of combined fetch `seq`.
    ///
    /// Returns `false`, leaving the store untouched, if a newer fetch has
    /// already been applied. Fetches that finish out of order therefore
    /// cannot roll the board back.
    pub fn replace_tasks(&mut self, seq: u64, tasks: Vec<Task>) -> bool {
        if seq < self.applied_seq {
            tracing::debug!(seq, applied = self.applied_seq, "ignoring stale board fetch");
            return false;
        }
        self.applied_seq = seq;
        self.board.tasks = tasks;
        true
    }

    /// The current board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// All tasks in combined-fetch order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.board.tasks
    }

    /// Tasks in one column, in board order.
    #[must_use]
    pub fn tasks_by_status(&self, status: Status) -> Vec<&Task> {
        self.board.tasks_by_status(status)
    }

    /// Looks a task up by id.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.board.tasks.iter().find(|t| t.id == *id)
    }

    /// Sequence number of the fetch currently applied.
    #[must_use]
    pub const fn applied_seq(&self) -> u64 {
        self.applied_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: Status) -> Task {
        Task {
            id: TaskId::new(id),
            title: id.to_string(),
            description: String::new(),
            status,
        }
    }

    fn store() -> BoardStore {
        BoardStore::new(BoardId::new("b"), "Main Board")
    }

    #[test]
    fn starts_empty() {
        let s = store();
        assert!(s.tasks().is_empty());
        assert_eq!(s.applied_seq(), 0);
        assert_eq!(s.board().name, "Main Board");
    }

    #[test]
    fn replace_swaps_whole_list() {
        let mut s = store();
        assert!(s.replace_tasks(1, vec![task("a", Status::Todo), task("b", Status::Done)]));
        assert!(s.replace_tasks(2, vec![task("c", Status::InProgress)]));
        let ids: Vec<&str> = s.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["c"]);
        assert!(s.find(&TaskId::new("a")).is_none());
    }

    #[test]
    fn stale_fetch_is_ignored() {
        let mut s = store();
        assert!(s.replace_tasks(5, vec![task("new", Status::Done)]));
        assert!(!s.replace_tasks(4, vec![task("old", Status::Todo)]));
        assert_eq!(s.tasks()[0].id, TaskId::new("new"));
        assert_eq!(s.applied_seq(), 5);
    }

    #[test]
    fn duplicate_ids_are_kept_unvalidated() {
        let mut s = store();
        s.replace_tasks(1, vec![task("x", Status::Todo), task("x", Status::Done)]);
        assert_eq!(s.tasks().len(), 2);
    }

    #[test]
    fn grouping_is_derived_from_status() {
        let mut s = store();
        s.replace_tasks(
            1,
            vec![
                task("a", Status::Todo),
                task("b", Status::InProgress),
                task("c", Status::Todo),
            ],
        );
        assert_eq!(s.tasks_by_status(Status::Todo).len(), 2);
        assert_eq!(s.tasks_by_status(Status::InProgress).len(), 1);
        assert!(s.tasks_by_status(Status::Done).is_empty());
    }
}
