// Build Engine Port
// Receives formatted diagnostics from tasks. How events are rendered,
// stored or forwarded is up to the implementation.

/// Importance of an informational message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageImportance {
    High,
    Normal,
    Low,
}

/// Event severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Message(MessageImportance),
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Message(_) => write!(f, "message"),
        }
    }
}

/// One formatted diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEvent {
    pub severity: Severity,
    pub code: Option<String>,
    pub message: String,
    /// Name of the task that raised the event
    pub sender_name: String,
    pub timestamp_millis: i64, // epoch ms
}

/// Event sink port
///
/// Tasks may log from several threads at once, so implementations must
/// accept concurrent callers.
pub trait BuildEngine: Send + Sync {
    fn log_event(&self, event: BuildEvent);
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Mutex, PoisonError};

    /// Records every event it receives
    #[derive(Default)]
    pub struct MockBuildEngine {
        events: Mutex<Vec<BuildEvent>>,
    }

    impl MockBuildEngine {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<BuildEvent> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        pub fn count(&self) -> usize {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        pub fn last(&self) -> Option<BuildEvent> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
        }

        pub fn errors(&self) -> usize {
            self.count_where(|e| e.severity == Severity::Error)
        }

        pub fn warnings(&self) -> usize {
            self.count_where(|e| e.severity == Severity::Warning)
        }

        pub fn messages(&self) -> usize {
            self.count_where(|e| matches!(e.severity, Severity::Message(_)))
        }

        fn count_where(&self, pred: impl Fn(&BuildEvent) -> bool) -> usize {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .filter(|e| pred(e))
                .count()
        }
    }

    impl BuildEngine for MockBuildEngine {
        fn log_event(&self, event: BuildEvent) {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event);
        }
    }
}
