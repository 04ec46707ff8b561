//! JSON encode/decode for API bodies.
//!
//! Thin wrappers over `serde_json` that fold its error into [`CodecError`]
//! so callers on both sides of the wire share one error type.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::TaskListResponse;

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The body was valid JSON but not the expected shape.
    #[error("unexpected body: {0}")]
    UnexpectedShape(String),
}

/// Encodes any API body as JSON bytes.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the value cannot be serialized.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(value).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes an API body from JSON bytes.
///
/// # Errors
///
/// Returns `CodecError::Serialization` for malformed JSON and
/// `CodecError::UnexpectedShape` for JSON that does not match `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| {
        if e.is_data() {
            CodecError::UnexpectedShape(e.to_string())
        } else {
            CodecError::Serialization(e.to_string())
        }
    })
}

/// Decodes a `{ "data": [...] }` list envelope.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_task_list(bytes: &[u8]) -> Result<TaskListResponse, CodecError> {
    decode(bytes)
}
