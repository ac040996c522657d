//! Task Logging Helper - catalog-scoped diagnostic emission
//!
//! Each helper is bound to exactly one [`MessageCatalog`]. Keys are resolved
//! in that catalog only; there is no fallback to another tier even when key
//! strings collide. A failed lookup or format aborts the call before anything
//! reaches the build engine.

use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::catalog::MessageCatalog;
use crate::domain::template::{extract_message_code, format_template};
use crate::domain::DomainError;
use crate::error::Result;
use crate::port::{BuildEngine, BuildEvent, MessageImportance, Severity, TimeProvider};

/// Logging helper bound to a single message catalog
#[derive(Clone)]
pub struct TaskLoggingHelper {
    catalog: &'static MessageCatalog,
    task_name: String,
    build_engine: Arc<dyn BuildEngine>,
    time_provider: Arc<dyn TimeProvider>,
}

impl TaskLoggingHelper {
    pub fn new(
        catalog: &'static MessageCatalog,
        task_name: impl Into<String>,
        build_engine: Arc<dyn BuildEngine>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            catalog,
            task_name: task_name.into(),
            build_engine,
            time_provider,
        }
    }

    pub fn catalog(&self) -> &'static MessageCatalog {
        self.catalog
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// Resolve `key` in the bound catalog and render it with `args`
    pub fn format_resource_string(&self, key: &str, args: &[&dyn Display]) -> Result<String> {
        let template = self.catalog.template(key).map_err(|err| {
            warn!(
                tier = %self.catalog.tier(),
                catalog = self.catalog.name(),
                key = %key,
                "Resource key not found"
            );
            err
        })?;

        Ok(format_template(key, template, args)?)
    }

    /// Log an error whose resource template must carry a diagnostic code
    pub fn log_error_with_code_from_resources(
        &self,
        key: &str,
        args: &[&dyn Display],
    ) -> Result<()> {
        let (code, message) = self.resolve_coded(key, args)?;
        self.emit(Severity::Error, Some(code), message);
        Ok(())
    }

    /// Log a warning whose resource template must carry a diagnostic code
    pub fn log_warning_with_code_from_resources(
        &self,
        key: &str,
        args: &[&dyn Display],
    ) -> Result<()> {
        let (code, message) = self.resolve_coded(key, args)?;
        self.emit(Severity::Warning, Some(code), message);
        Ok(())
    }

    /// Log an error; a leading code in the template is split off if present
    pub fn log_error_from_resources(&self, key: &str, args: &[&dyn Display]) -> Result<()> {
        let (code, message) = self.resolve(key, args)?;
        self.emit(Severity::Error, code, message);
        Ok(())
    }

    /// Log a warning; a leading code in the template is split off if present
    pub fn log_warning_from_resources(&self, key: &str, args: &[&dyn Display]) -> Result<()> {
        let (code, message) = self.resolve(key, args)?;
        self.emit(Severity::Warning, code, message);
        Ok(())
    }

    /// Log an informational message with normal importance
    pub fn log_message_from_resources(&self, key: &str, args: &[&dyn Display]) -> Result<()> {
        self.log_message_from_resources_with_importance(MessageImportance::Normal, key, args)
    }

    pub fn log_message_from_resources_with_importance(
        &self,
        importance: MessageImportance,
        key: &str,
        args: &[&dyn Display],
    ) -> Result<()> {
        let message = self.format_resource_string(key, args)?;
        self.emit(Severity::Message(importance), None, message);
        Ok(())
    }

    fn resolve(&self, key: &str, args: &[&dyn Display]) -> Result<(Option<String>, String)> {
        let rendered = self.format_resource_string(key, args)?;
        let (code, message) = extract_message_code(&rendered);
        Ok((code.map(str::to_string), message.to_string()))
    }

    fn resolve_coded(&self, key: &str, args: &[&dyn Display]) -> Result<(String, String)> {
        match self.resolve(key, args)? {
            (Some(code), message) => Ok((code, message)),
            (None, _) => Err(DomainError::MissingMessageCode {
                key: key.to_string(),
            }
            .into()),
        }
    }

    fn emit(&self, severity: Severity, code: Option<String>, message: String) {
        debug!(
            task = %self.task_name,
            tier = %self.catalog.tier(),
            severity = %severity,
            code = ?code,
            "Forwarding build event"
        );

        self.build_engine.log_event(BuildEvent {
            severity,
            code,
            message,
            sender_name: self.task_name.clone(),
            timestamp_millis: self.time_provider.now_millis(),
        });
    }
}

impl std::fmt::Debug for TaskLoggingHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskLoggingHelper")
            .field("catalog", &self.catalog)
            .field("task_name", &self.task_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CatalogTier;
    use crate::port::build_engine::mocks::MockBuildEngine;
    use crate::port::time_provider::mocks::FixedTimeProvider;

    static STRINGS: MessageCatalog = MessageCatalog::task_local(
        "Test",
        &[
            ("Test.Coded", "TST1001: File \"{0}\" is locked by \"{1}\"."),
            ("Test.Plain", "Copying \"{0}\"."),
            ("Test.NoArgs", "Nothing to do."),
        ],
    );

    fn helper() -> (TaskLoggingHelper, Arc<MockBuildEngine>) {
        let engine = Arc::new(MockBuildEngine::new());
        let helper = TaskLoggingHelper::new(
            &STRINGS,
            "TestTask",
            engine.clone(),
            Arc::new(FixedTimeProvider(1000)),
        );
        (helper, engine)
    }

    #[test]
    fn test_error_with_code_splits_code() {
        let (log, engine) = helper();
        log.log_error_with_code_from_resources("Test.Coded", &[&"a.dll", &"devenv"])
            .unwrap();

        let event = engine.last().unwrap();
        assert_eq!(event.severity, Severity::Error);
        assert_eq!(event.code.as_deref(), Some("TST1001"));
        assert_eq!(event.message, "File \"a.dll\" is locked by \"devenv\".");
        assert_eq!(event.sender_name, "TestTask");
        assert_eq!(event.timestamp_millis, 1000);
    }

    #[test]
    fn test_warning_with_code_requires_code() {
        let (log, engine) = helper();
        let err = log
            .log_warning_with_code_from_resources("Test.Plain", &[&"x"])
            .unwrap_err();

        assert!(matches!(
            err.as_domain(),
            Some(DomainError::MissingMessageCode { key }) if key == "Test.Plain"
        ));
        assert_eq!(engine.count(), 0);
    }

    #[test]
    fn test_message_does_not_require_code() {
        let (log, engine) = helper();
        log.log_message_from_resources("Test.Plain", &[&"a.txt"]).unwrap();
        log.log_message_from_resources_with_importance(MessageImportance::Low, "Test.NoArgs", &[])
            .unwrap();

        let events = engine.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].severity, Severity::Message(MessageImportance::Normal));
        assert_eq!(events[0].code, None);
        assert_eq!(events[1].severity, Severity::Message(MessageImportance::Low));
        assert_eq!(events[1].message, "Nothing to do.");
    }

    #[test]
    fn test_error_from_resources_keeps_optional_code() {
        let (log, engine) = helper();
        log.log_error_from_resources("Test.Plain", &[&"a.txt"]).unwrap();
        log.log_error_from_resources("Test.Coded", &[&"b", &"c"]).unwrap();
        log.log_warning_from_resources("Test.Plain", &[&"c.txt"]).unwrap();

        let events = engine.events();
        assert_eq!(events[0].code, None);
        assert_eq!(events[1].code.as_deref(), Some("TST1001"));
        assert_eq!(events[2].severity, Severity::Warning);
        assert_eq!(engine.errors(), 2);
        assert_eq!(engine.warnings(), 1);
    }

    #[test]
    fn test_missing_key_fails_before_emitting() {
        let (log, engine) = helper();
        let err = log
            .log_error_from_resources("Beyond Good and Evil", &[])
            .unwrap_err();

        match err.as_domain() {
            Some(DomainError::MissingResourceKey { tier, catalog, key }) => {
                assert_eq!(*tier, CatalogTier::TaskLocal);
                assert_eq!(catalog, "Test");
                assert_eq!(key, "Beyond Good and Evil");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(engine.count(), 0);
    }

    #[test]
    fn test_format_error_fails_before_emitting() {
        let (log, engine) = helper();
        let err = log
            .log_error_with_code_from_resources("Test.Coded", &[&"only one"])
            .unwrap_err();

        assert!(matches!(err.as_domain(), Some(DomainError::Format { .. })));
        assert_eq!(engine.count(), 0);
    }

    #[test]
    fn test_format_resource_string_does_not_emit() {
        let (log, engine) = helper();
        let text = log.format_resource_string("Test.Plain", &[&"x"]).unwrap();

        assert_eq!(text, "Copying \"x\".");
        assert_eq!(engine.count(), 0);
    }
}
