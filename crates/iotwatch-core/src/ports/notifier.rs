//! User-visible transient notifications.

use serde::Serialize;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A short message shown to the user (toast, status line, stderr).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// A warning notice.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }
}

/// Sink for user-visible notices.
///
/// The transport client calls this exactly once per failed call.
/// Implementations must not block.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Show a notice to the user.
    fn notify(&self, notice: Notice);
}

/// A notifier that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notice: Notice) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_notice_constructors() {
        assert_eq!(Notice::error("x").level, NoticeLevel::Error);
        assert_eq!(Notice::warning("x").level, NoticeLevel::Warning);
        assert_eq!(Notice::success("done").message, "done");
    }

    #[test]
    fn test_noop_notifier_as_trait_object() {
        let notifier: Arc<dyn Notifier> = Arc::new(NoopNotifier);
        notifier.notify(Notice::error("ignored"));
    }
}
