// Build engine adapter that forwards events to `tracing`

use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, error, info, warn};

use buildtask_core::port::{BuildEngine, BuildEvent, MessageImportance, Severity};

/// Emits every build event as a `tracing` event under the `buildtask` target.
///
/// Errors and warnings map to the matching levels; messages map to `info`
/// (high/normal importance) or `debug` (low importance).
#[derive(Default)]
pub struct TracingBuildEngine {
    errors: AtomicUsize,
    warnings: AtomicUsize,
}

impl TracingBuildEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }
}

impl BuildEngine for TracingBuildEngine {
    fn log_event(&self, event: BuildEvent) {
        let code = event.code.as_deref().unwrap_or_default();

        match event.severity {
            Severity::Error => {
                self.errors.fetch_add(1, Ordering::Relaxed);
                error!(
                    target: "buildtask::build",
                    task = %event.sender_name,
                    code = %code,
                    timestamp = event.timestamp_millis,
                    "{}",
                    event.message
                );
            }
            Severity::Warning => {
                self.warnings.fetch_add(1, Ordering::Relaxed);
                warn!(
                    target: "buildtask::build",
                    task = %event.sender_name,
                    code = %code,
                    timestamp = event.timestamp_millis,
                    "{}",
                    event.message
                );
            }
            Severity::Message(MessageImportance::Low) => {
                debug!(
                    target: "buildtask::build",
                    task = %event.sender_name,
                    timestamp = event.timestamp_millis,
                    "{}",
                    event.message
                );
            }
            Severity::Message(_) => {
                info!(
                    target: "buildtask::build",
                    task = %event.sender_name,
                    timestamp = event.timestamp_millis,
                    "{}",
                    event.message
                );
            }
        }
    }
}
