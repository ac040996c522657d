// Application Layer - Task runtime services

pub mod architecture_probe;
pub mod logging;
pub mod tool_task;

// Re-exports
pub use architecture_probe::ArchitectureProbe;
pub use logging::TaskLoggingHelper;
pub use tool_task::{ToolTask, ToolTaskExtension, MAX_COMMAND_LINE_LENGTH};
