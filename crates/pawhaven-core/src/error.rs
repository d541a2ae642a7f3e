//! Error types module
//!
//! Every failure a submission attempt can hit is represented by [`SubmissionError`].
//! The variants follow the pipeline's taxonomy: transport failures, structured
//! rejections from a remote API, and validation failures caught before any
//! network call. None of them is fatal; each is recoverable by resubmitting.

use std::fmt;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for remote rejections the user can correct
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the user.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "TRANSPORT_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether resubmitting the same form can succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message shown in the notification
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// A single invalid form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote rejection (HTTP {status}): {message}")]
    RemoteRejection { status: u16, message: String },

    #[error("Validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("A submission is already in progress")]
    InFlight,
}

impl SubmissionError {
    /// Generic transport failure for a non-success status without a parseable body.
    pub fn http_status(status: u16) -> Self {
        SubmissionError::Transport(format!("HTTP status {}", status))
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubmissionError::Validation(vec![FieldError::new(field, message)])
    }

    /// Get the error type name for log fields
    pub fn error_type(&self) -> &'static str {
        match self {
            SubmissionError::Transport(_) => "Transport",
            SubmissionError::RemoteRejection { .. } => "RemoteRejection",
            SubmissionError::Validation(_) => "Validation",
            SubmissionError::NotFound(_) => "NotFound",
            SubmissionError::InFlight => "InFlight",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SubmissionError::Validation(_))
    }
}

impl From<validator::ValidationErrors> for SubmissionError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, list)| {
                list.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid ({})", field, err.code));
                    FieldError::new(field.to_string(), message)
                })
            })
            .collect();
        // HashMap iteration order is unstable; keep messages deterministic
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        SubmissionError::Validation(fields)
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn submission_error_static_metadata(
    err: &SubmissionError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        SubmissionError::Transport(_) => (
            "TRANSPORT_ERROR",
            true,
            Some("Check your connection and submit again"),
            LogLevel::Error,
        ),
        SubmissionError::RemoteRejection { .. } => (
            "REMOTE_REJECTION",
            true,
            Some("Review the message and submit again"),
            LogLevel::Warn,
        ),
        SubmissionError::Validation(_) => (
            "VALIDATION_ERROR",
            true,
            Some("Fix the highlighted fields and submit again"),
            LogLevel::Debug,
        ),
        SubmissionError::NotFound(_) => (
            "NOT_FOUND",
            false,
            Some("Verify the pet ID exists"),
            LogLevel::Debug,
        ),
        SubmissionError::InFlight => (
            "SUBMISSION_IN_FLIGHT",
            true,
            Some("Wait for the current submission to finish"),
            LogLevel::Debug,
        ),
    }
}

impl ErrorMetadata for SubmissionError {
    fn error_code(&self) -> &'static str {
        submission_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        submission_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        submission_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        submission_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            SubmissionError::Transport(ref msg) => msg.clone(),
            SubmissionError::RemoteRejection { ref message, .. } => message.clone(),
            SubmissionError::Validation(ref fields) => fields
                .iter()
                .map(|f| f.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            SubmissionError::NotFound(ref msg) => msg.clone(),
            SubmissionError::InFlight => "A submission is already in progress".to_string(),
        }
    }
}

/// Log an error at the level its metadata asks for.
pub fn log_error(error: &SubmissionError, stage: &'static str) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, stage = stage, "Submission error");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, stage = stage, "Submission error");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, stage = stage, "Submission error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(range(max = 10))]
        count: u32,
    }

    #[test]
    fn test_error_metadata_remote_rejection() {
        let err = SubmissionError::RemoteRejection {
            status: 400,
            message: "Invalid preset".to_string(),
        };
        assert_eq!(err.error_code(), "REMOTE_REJECTION");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Invalid preset");
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_http_status_fallback_message() {
        let err = SubmissionError::http_status(502);
        assert_eq!(err.error_code(), "TRANSPORT_ERROR");
        assert_eq!(err.client_message(), "HTTP status 502");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_validation_errors_are_sorted_and_joined() {
        let sample = Sample {
            name: String::new(),
            count: 11,
        };
        let err = SubmissionError::from(sample.validate().unwrap_err());
        match &err {
            SubmissionError::Validation(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].field, "count");
                assert_eq!(fields[1].field, "name");
                assert_eq!(fields[1].message, "Name is required");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(err.client_message().ends_with("Name is required"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_suggested_actions() {
        assert_eq!(
            SubmissionError::NotFound("pet".to_string()).suggested_action(),
            Some("Verify the pet ID exists")
        );
        assert!(!SubmissionError::NotFound("pet".to_string()).is_recoverable());
        assert_eq!(
            SubmissionError::InFlight.error_code(),
            "SUBMISSION_IN_FLIGHT"
        );
    }
}
