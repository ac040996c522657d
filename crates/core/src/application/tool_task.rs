//! Tool Task base - parameters plus three catalog-scoped loggers
//!
//! A concrete task supplies a [`ToolTask`] definition and its own task-local
//! catalog. The runtime adds the shared and private catalogs. Only the
//! task-local helper is public; the other two are reachable from runtime
//! code inside this crate and nowhere else.

use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

use crate::domain::catalog::{CatalogTier, MessageCatalog};
use crate::domain::parameter::{FromParameterValue, ParameterBag, ParameterKind};
use crate::domain::DomainError;
use crate::error::Result;
use crate::port::{BuildEngine, MessageImportance, TimeProvider};
use crate::resources::{SHARED_STRINGS, UTILITIES_STRINGS};

use super::logging::TaskLoggingHelper;

/// Longest command line (in characters) a tool can be given reliably
pub const MAX_COMMAND_LINE_LENGTH: usize = 32_000;

/// What a concrete tool task must describe about itself
pub trait ToolTask: Send + Sync {
    /// Name of the tool executable (e.g. `csc.exe`)
    fn tool_name(&self) -> &str;

    /// Full path to the tool; empty when it cannot be located
    fn generate_full_path_to_tool(&self) -> String;
}

/// Runtime state shared by every tool task
pub struct ToolTaskExtension<T: ToolTask> {
    tool: T,
    bag: ParameterBag,
    log: TaskLoggingHelper,
    log_shared: TaskLoggingHelper,
    log_private: TaskLoggingHelper,
}

impl<T: ToolTask> ToolTaskExtension<T> {
    /// Create the task runtime around `tool`.
    ///
    /// # Arguments
    ///
    /// * `tool` - Concrete tool definition
    /// * `task_resources` - The task's own catalog (task-local tier)
    /// * `build_engine` - Sink for every logged event
    /// * `time_provider` - Timestamp source for events
    pub fn new(
        tool: T,
        task_resources: &'static MessageCatalog,
        build_engine: Arc<dyn BuildEngine>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        debug_assert_eq!(task_resources.tier(), CatalogTier::TaskLocal);

        let task_name = tool.tool_name().to_string();
        let helper = |catalog: &'static MessageCatalog| {
            TaskLoggingHelper::new(
                catalog,
                task_name.clone(),
                build_engine.clone(),
                time_provider.clone(),
            )
        };

        Self {
            log: helper(task_resources),
            log_shared: helper(&SHARED_STRINGS),
            log_private: helper(&UTILITIES_STRINGS),
            bag: ParameterBag::new(),
            tool,
        }
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Logger for the task's own diagnostics
    pub fn log(&self) -> &TaskLoggingHelper {
        &self.log
    }

    /// Logger for diagnostics shared by all tasks on this runtime
    pub(crate) fn log_shared(&self) -> &TaskLoggingHelper {
        &self.log_shared
    }

    /// Logger for diagnostics internal to runtime utilities
    pub(crate) fn log_private(&self) -> &TaskLoggingHelper {
        &self.log_private
    }

    pub fn bag(&self) -> &ParameterBag {
        &self.bag
    }

    pub fn bag_mut(&mut self) -> &mut ParameterBag {
        &mut self.bag
    }

    /// Merge parameters from a JSON object into the bag, overwriting existing
    /// keys. Returns the number of parameters read.
    pub fn load_parameters(&mut self, json: &str) -> Result<usize> {
        let incoming = ParameterBag::from_json(json)?;
        let count = incoming.len();
        for (key, value) in incoming.iter() {
            self.bag.set(key, value.clone());
        }

        debug!(task = %self.tool.tool_name(), count, "Parameters loaded");
        Ok(count)
    }

    /// Assign a parameter from its string form.
    ///
    /// Returns `false` (after logging a shared error) when `raw` is not a
    /// valid value of `kind`; the bag is left untouched in that case.
    pub fn set_parameter_from_string(
        &mut self,
        key: &str,
        kind: ParameterKind,
        raw: &str,
    ) -> Result<bool> {
        match kind.parse(raw) {
            Some(value) => {
                self.bag.set(key, value);
                Ok(true)
            }
            None => {
                let resource = match kind {
                    ParameterKind::Int => "Shared.CannotConvertStringToInt",
                    _ => "Shared.CannotConvertStringToBool",
                };
                self.log_shared()
                    .log_error_with_code_from_resources(resource, &[&raw])?;
                Ok(false)
            }
        }
    }

    /// Read a parameter with a default; a kind mismatch is logged on the
    /// shared catalog and then returned as an error.
    pub fn get_parameter_with_default<V: FromParameterValue>(
        &self,
        key: &str,
        default: V,
    ) -> Result<V> {
        match self.bag.get_parameter_with_default(key, default) {
            Ok(value) => Ok(value),
            Err(DomainError::TypeMismatch {
                key,
                expected,
                found,
            }) => {
                self.log_shared().log_error_with_code_from_resources(
                    "Shared.ParameterTypeMismatch",
                    &[&key, &expected, &found],
                )?;
                Err(DomainError::TypeMismatch {
                    key,
                    expected,
                    found,
                }
                .into())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn get_bool_parameter_with_default(&self, key: &str, default: bool) -> Result<bool> {
        self.get_parameter_with_default(key, default)
    }

    pub fn get_int_parameter_with_default(&self, key: &str, default: i32) -> Result<i32> {
        self.get_parameter_with_default(key, default)
    }

    /// Locate the tool, logging a private error when the path is empty
    pub fn resolve_tool_path(&self) -> Result<Option<String>> {
        let path = self.tool.generate_full_path_to_tool();
        if path.trim().is_empty() {
            self.log_private().log_error_with_code_from_resources(
                "ToolTask.ToolExecutableNotFound",
                &[&self.tool.tool_name()],
            )?;
            return Ok(None);
        }

        Ok(Some(path))
    }

    /// Check a command line before it is handed to the tool.
    ///
    /// The command line is logged at low importance. Returns `false` after
    /// logging a private error when it exceeds [`MAX_COMMAND_LINE_LENGTH`].
    pub fn validate_command_line(&self, command_line: &str) -> Result<bool> {
        self.log_private().log_message_from_resources_with_importance(
            MessageImportance::Low,
            "ToolTask.CommandLine",
            &[&self.tool.tool_name(), &command_line],
        )?;

        if command_line.chars().count() > MAX_COMMAND_LINE_LENGTH {
            self.log_private().log_error_with_code_from_resources(
                "ToolTask.CommandTooLong",
                &[&self.tool.tool_name(), &MAX_COMMAND_LINE_LENGTH],
            )?;
            return Ok(false);
        }

        Ok(true)
    }

    /// Report that the tool process could not be started
    pub fn report_tool_start_failure(&self, reason: &dyn Display) -> Result<()> {
        self.log_private().log_warning_with_code_from_resources(
            "ToolTask.CouldNotStartToolExecutable",
            &[&self.tool.tool_name(), &reason],
        )
    }
}
