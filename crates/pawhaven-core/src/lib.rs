//! PawHaven Core Library
//!
//! This crate provides the domain models, error types, configuration and validation
//! shared by the media uploader, the backend client and the submission pipeline.

pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{log_error, ErrorMetadata, FieldError, LogLevel, SubmissionError};
pub use hooks::{NoOpNotifier, NotificationKind, Notifier, Session, TracingNotifier};
