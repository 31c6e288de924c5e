//! User-facing notifications (toasts)

use std::fmt;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Operation completed
    Success,
    /// Operation failed or input is missing
    Error,
}

/// A message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub level: Level,
    /// Text shown to the user
    pub message: String,
}

impl Notification {
    /// Success notification
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    /// Error notification
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::Success => write!(f, "✓ {}", self.message),
            Level::Error => write!(f, "✗ {}", self.message),
        }
    }
}

/// Fire-and-forget notification sink
pub trait Notifier: Send + Sync {
    /// Show a notification
    fn notify(&self, notification: Notification);

    /// Show a success message
    fn success(&self, message: &str) {
        self.notify(Notification::success(message));
    }

    /// Show an error message
    fn error(&self, message: &str) {
        self.notify(Notification::error(message));
    }
}

/// Notifier that writes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Success => tracing::info!(message = %notification.message, "Notification"),
            Level::Error => tracing::error!(message = %notification.message, "Notification"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collect(Mutex<Vec<Notification>>);

    impl Notifier for Collect {
        fn notify(&self, notification: Notification) {
            if let Ok(mut seen) = self.0.lock() {
                seen.push(notification);
            }
        }
    }

    #[test]
    fn default_helpers_route_through_notify() {
        let sink = Collect::default();
        sink.success("saved");
        sink.error("failed");

        let seen = sink.0.lock().map(|v| v.clone()).unwrap_or_default();
        assert_eq!(
            seen,
            vec![Notification::success("saved"), Notification::error("failed")]
        );
    }

    #[test]
    fn display_marks_level() {
        assert_eq!(Notification::success("ok").to_string(), "✓ ok");
        assert_eq!(Notification::error("no").to_string(), "✗ no");
        TracingNotifier.error("logged only");
    }
}
