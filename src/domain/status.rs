//! UI status value object

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Normal,
    Error,
}

/// A single user-visible status line. Replace-only: renderers overwrite
/// the previous status, they never queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiStatus {
    message: String,
    severity: Severity,
}

impl UiStatus {
    /// A normal-severity status
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Normal,
        }
    }

    /// An error-severity status
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
