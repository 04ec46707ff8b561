//! Shared wire definitions for the `Taskboard` REST API.

pub mod api;
pub mod codec;
pub mod task;
