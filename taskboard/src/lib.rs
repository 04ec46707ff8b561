//! Taskboard: terminal kanban client for a REST task service.

pub mod api;
pub mod app;
pub mod board;
pub mod config;
pub mod form;
pub mod net;
pub mod sync;
pub mod ui;
