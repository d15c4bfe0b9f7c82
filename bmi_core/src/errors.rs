//! # Error Types
//!
//! Structured error types for bmi_core. Every failure the calculator or the
//! record store can produce is one of these variants, and each one renders
//! to a single user-facing line via [`CalcError::user_message`].
//!
//! ## Example
//!
//! ```rust
//! use bmi_core::errors::{CalcError, CalcResult};
//!
//! fn validate_height(height_m: f64) -> CalcResult<()> {
//!     if height_m <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "height_m".to_string(),
//!             value: height_m.to_string(),
//!             reason: "Values must be greater than 0".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for bmi_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculator and record store operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-numeric or out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The data file does not exist
    #[error("File not found: '{path}'")]
    FileNotFound { path: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// A line in a data file does not match the expected format
    #[error("Parse error in '{path}' line {line}: {reason} (content: {content:?})")]
    ParseError {
        path: String,
        line: usize,
        content: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        CalcError::FileNotFound { path: path.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ParseError for a 1-based line number
    pub fn parse_error(
        path: impl Into<String>,
        line: usize,
        content: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::ParseError {
            path: path.into(),
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::FileNotFound { .. } => "FILE_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::ParseError { .. } => "PARSE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }

    /// Short message suitable for a status bar or terminal line.
    ///
    /// Validation errors show only their reason, since the form already
    /// tells the user which field they typed into.
    pub fn user_message(&self) -> String {
        match self {
            CalcError::InvalidInput { reason, .. } => reason.clone(),
            CalcError::MissingField { field } => format!("Please enter a {}", field.replace('_', " ")),
            CalcError::FileNotFound { path } => format!("File not found: {}", path),
            CalcError::FileError { operation, path, reason } => {
                format!("Could not {} '{}': {}", operation, path, reason)
            }
            CalcError::ParseError { line, reason, .. } => format!("Line {}: {}", line, reason),
            CalcError::SerializationError { reason } => reason.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::parse_error("data.txt", 3, "1.80\tabc", "weight is not a number");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
        assert!(json.contains("\"type\":\"ParseError\""));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("file_name").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::file_not_found("x.txt").error_code(), "FILE_NOT_FOUND");
        assert_eq!(CalcError::parse_error("x", 1, "", "").error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_user_messages() {
        let err = CalcError::invalid_input("height_m", "0", "Values must be greater than 0");
        assert_eq!(err.user_message(), "Values must be greater than 0");

        let err = CalcError::missing_field("file_name");
        assert_eq!(err.user_message(), "Please enter a file name");

        let err = CalcError::parse_error("data.txt", 2, "x", "expected 2 fields, found 1");
        assert_eq!(err.user_message(), "Line 2: expected 2 fields, found 1");
    }
}
