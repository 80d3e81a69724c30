/*!
 * JSON Serialization
 * Human-readable payload marshaling for the transport boundary
 */

use serde::{de::DeserializeOwned, Serialize};

/// Result type for JSON operations
pub type JsonResult<T> = Result<T, JsonError>;

/// JSON operation errors
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Serialize to JSON bytes
#[inline]
pub fn to_vec<T: Serialize>(value: &T) -> JsonResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| JsonError::Serialization(e.to_string()))
}

/// Deserialize from JSON bytes
#[inline]
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> JsonResult<T> {
    serde_json::from_slice(bytes).map_err(|e| JsonError::Deserialization(e.to_string()))
}

/// Serialize to a JSON string (for logs and diagnostics)
#[inline]
pub fn to_string<T: Serialize>(value: &T) -> JsonResult<String> {
    serde_json::to_string(value).map_err(|e| JsonError::Serialization(e.to_string()))
}
