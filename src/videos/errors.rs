//! # Video Errors
//!
//! Error types for the video lifecycle.

use serde::Serialize;
use thiserror::Error;

/// Result type for video operations
pub type VideoResult<T> = Result<T, VideoError>;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub message: String,
    pub field: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: field.into(),
        }
    }
}

/// Every field failure found in one request, in field order.
///
/// Serializes to the wire shape `{"errorsMessages": [{message, field}, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub errors_messages: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors_messages.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors_messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors_messages.len()
    }

    /// Names of the offending fields, in order
    pub fn fields(&self) -> Vec<&str> {
        self.errors_messages.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.errors_messages.iter().any(|e| e.field == field)
    }
}

/// Video lifecycle errors
#[derive(Debug, Clone, Error)]
pub enum VideoError {
    /// Request failed validation; nothing was mutated
    #[error("Validation failed for: {}", .0.fields().join(", "))]
    Validation(ValidationErrors),

    /// No record with this id
    #[error("Video not found: {0}")]
    NotFound(i64),

    /// Path id is not an integer, so it can never match a record
    #[error("Video not found: {0}")]
    InvalidId(String),

    /// Insert collided with a stored id
    #[error("Duplicate video id: {0}")]
    DuplicateId(i64),

    /// Every id up to `i64::MAX` has been handed out
    #[error("Video id space exhausted")]
    IdsExhausted,

    /// Store lock poisoned or similar
    #[error("Storage error: {0}")]
    Storage(String),
}

impl VideoError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            VideoError::Validation(_) => 400,
            VideoError::NotFound(_) => 404,
            VideoError::InvalidId(_) => 404,
            VideoError::DuplicateId(_) => 500,
            VideoError::IdsExhausted => 500,
            VideoError::Storage(_) => 500,
        }
    }
}
