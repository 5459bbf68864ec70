//! Custom error types for acceptance-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for acceptance operations
#[derive(Error, Debug)]
pub enum AcceptanceError {
    /// A line item was requested from a draft with no rows to inherit from
    #[error("Cannot add a work group: upload acceptance data first")]
    EmptyDraft,

    /// No row in the draft carries the requested position number
    #[error("Position {position} not found in the draft")]
    PositionNotFound { position: u32 },

    /// Save was requested on an empty draft
    #[error("Nothing to save")]
    NothingToSave,

    /// Another save is still outstanding
    #[error("A save is already in progress")]
    SaveInProgress,

    /// The persistence collaborator rejected the batch
    #[error("Failed to save receptions: {0}")]
    PersistenceFailure(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upload (CSV import) errors
    #[error("Import error: {0}")]
    Import(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AcceptanceError {
    /// Create a "not found" error for position numbers
    pub fn position_not_found(position: u32) -> Self {
        Self::PositionNotFound { position }
    }

    /// Create a "not found" error for line items
    pub fn line_item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Line item",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::PositionNotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Workflow errors the user can fix and retry; the draft is never touched
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EmptyDraft
                | Self::PositionNotFound { .. }
                | Self::NothingToSave
                | Self::SaveInProgress
                | Self::PersistenceFailure(_)
                | Self::Validation(_)
        )
    }
}

impl From<std::io::Error> for AcceptanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AcceptanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for AcceptanceError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for acceptance operations
pub type AcceptanceResult<T> = Result<T, AcceptanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AcceptanceError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_position_not_found() {
        let err = AcceptanceError::position_not_found(7);
        assert_eq!(err.to_string(), "Position 7 not found in the draft");
        assert!(err.is_not_found());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_workflow_errors_are_recoverable() {
        assert!(AcceptanceError::EmptyDraft.is_recoverable());
        assert!(AcceptanceError::NothingToSave.is_recoverable());
        assert!(AcceptanceError::PersistenceFailure("disk full".into()).is_recoverable());
        assert!(!AcceptanceError::Config("bad".into()).is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AcceptanceError = io_err.into();
        assert!(matches!(err, AcceptanceError::Io(_)));
    }
}
