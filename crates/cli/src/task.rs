//! The CLI's own tool task: a task-local catalog plus the runtime base

use std::sync::Arc;

use buildtask_core::application::{ToolTask, ToolTaskExtension};
use buildtask_core::domain::MessageCatalog;
use buildtask_core::port::time_provider::SystemTimeProvider;
use buildtask_core::port::BuildEngine;

pub const TASK_NAME: &str = "buildtask";

pub static CLI_STRINGS: MessageCatalog = MessageCatalog::task_local(
    "Cli",
    &[
        ("Cli.ArchitectureDetected", "Host processor architecture: {0}."),
        (
            "Cli.ArchitectureUnsupported",
            "BTC3001: This host does not support the native architecture query.",
        ),
        (
            "Cli.ArchitectureUnrecognized",
            "BTC3002: The host processor architecture is not recognized.",
        ),
        ("Cli.ParametersLoaded", "Loaded {0} parameter(s) from \"{1}\"."),
        ("Cli.ParameterResolved", "Parameter \"{0}\" resolved to \"{1}\"."),
        (
            "Cli.InvalidDefault",
            "BTC3003: Default value \"{0}\" is not a valid {1} value.",
        ),
        (
            "Cli.InvalidAssignment",
            "BTC3004: \"{0}\" is not a KEY=VALUE assignment.",
        ),
    ],
);

pub struct CliTool;

impl ToolTask for CliTool {
    fn tool_name(&self) -> &str {
        TASK_NAME
    }

    fn generate_full_path_to_tool(&self) -> String {
        std::env::current_exe()
            .map(|path| path.display().to_string())
            .unwrap_or_default()
    }
}

pub fn new_task(build_engine: Arc<dyn BuildEngine>) -> ToolTaskExtension<CliTool> {
    ToolTaskExtension::new(
        CliTool,
        &CLI_STRINGS,
        build_engine,
        Arc::new(SystemTimeProvider),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildtask_core::domain::template::extract_message_code;
    use buildtask_core::port::build_engine::mocks::MockBuildEngine;

    #[test]
    fn test_coded_entries_carry_codes() {
        for key in [
            "Cli.ArchitectureUnsupported",
            "Cli.ArchitectureUnrecognized",
            "Cli.InvalidDefault",
            "Cli.InvalidAssignment",
        ] {
            let template = CLI_STRINGS.template(key).unwrap();
            assert!(extract_message_code(template).0.is_some(), "{} has no code", key);
        }
    }

    #[test]
    fn test_task_logs_from_cli_catalog() {
        let engine = Arc::new(MockBuildEngine::new());
        let task = new_task(engine.clone());

        task.log()
            .log_message_from_resources("Cli.ArchitectureDetected", &[&"AMD64"])
            .unwrap();

        let event = engine.last().unwrap();
        assert_eq!(event.sender_name, TASK_NAME);
        assert_eq!(event.message, "Host processor architecture: AMD64.");
    }

    #[test]
    fn test_runtime_keys_are_not_in_cli_catalog() {
        let engine = Arc::new(MockBuildEngine::new());
        let task = new_task(engine.clone());

        assert!(task
            .log()
            .log_error_with_code_from_resources("ToolTask.CommandTooLong", &[&"x", &1])
            .is_err());
        assert_eq!(engine.count(), 0);
    }
}
