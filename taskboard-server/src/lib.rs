//! `Taskboard` development API server library.
//!
//! Exposes the in-memory REST server for use in tests and local runs.
//! It implements the task routes the board client consumes, backed by
//! an ephemeral [`store::TaskStore`].

pub mod config;
pub mod server;
pub mod store;
