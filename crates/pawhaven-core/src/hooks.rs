//! Hooks and context passed into the pipeline
//!
//! The pipeline never reaches for ambient state: the signed-in user arrives as
//! an explicit [`Session`], and user-visible feedback goes through a
//! [`Notifier`] supplied by whatever front end drives the pipeline.

use std::fmt;

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Trait for surfacing toasts or messages to the user
///
/// Implementations must not block; the pipeline calls them inline.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);

    fn success(&self, message: &str) {
        self.notify(NotificationKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(NotificationKind::Error, message);
    }
}

/// No-op implementation for headless callers
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, _kind: NotificationKind, _message: &str) {}
}

/// Notifier that writes notifications to the tracing subscriber.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => tracing::info!(target: "pawhaven::notify", "{}", message),
            NotificationKind::Error => tracing::warn!(target: "pawhaven::notify", "{}", message),
        }
    }
}

/// Authenticated user context handed to a form at construction.
#[derive(Clone)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    /// Bearer token forwarded to the backend. Never log this field.
    pub token: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
