//! Crate error type.
//!
//! Constraint failures during scheduling are not errors; they are
//! [`crate::eligibility::Eligibility`] values. Errors are reserved for
//! malformed input and I/O.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by the fallible entry points.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The instance failed validation. Holds every detected problem.
    #[error("invalid input ({} problem(s)): {}", .0.len(), join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The wire format could not be parsed or produced.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

/// Result alias for crate operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InstanceData;

    #[test]
    fn test_invalid_input_message() {
        let errors = InstanceData::new(10, 0).validate().unwrap_err();
        let err = ScheduleError::from(errors);
        let text = err.to_string();
        assert!(text.starts_with("invalid input"));
        assert!(text.contains("Closing time 0 must be after opening time 10"));
        assert!(text.contains("no channels"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: ScheduleError = parse.unwrap_err().into();
        assert!(matches!(err, ScheduleError::Json(_)));
    }
}
