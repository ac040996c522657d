//! Resource Access Integration Tests
//!
//! A task crate sees three catalogs: its own (through `log()`), and the
//! runtime's shared and private catalogs (only through runtime operations).

use std::sync::Arc;
use std::thread;

use buildtask_core::application::{ToolTask, ToolTaskExtension, MAX_COMMAND_LINE_LENGTH};
use buildtask_core::domain::{CatalogTier, DomainError, MessageCatalog, ParameterKind};
use buildtask_core::port::build_engine::mocks::MockBuildEngine;
use buildtask_core::port::time_provider::mocks::FixedTimeProvider;
use buildtask_core::port::{MessageImportance, Severity};
use buildtask_core::TaskError;
use buildtask_infra_system::TracingBuildEngine;

static CSC_STRINGS: MessageCatalog = MessageCatalog::task_local(
    "Csc",
    &[
        (
            "Csc.AssemblyAliasContainsIllegalCharacters",
            "CS1001: The assembly alias \"{0}\" on reference \"{1}\" contains illegal characters.",
        ),
        ("Csc.InvalidParameter", "CS1002: The compiler parameter is invalid."),
        (
            "Vbc.ParameterHasInvalidValue",
            "Parameter \"{0}\" has invalid value \"{1}\".",
        ),
    ],
);

struct Csc;

impl ToolTask for Csc {
    fn tool_name(&self) -> &str {
        "csc.exe"
    }

    fn generate_full_path_to_tool(&self) -> String {
        "/usr/lib/dotnet/csc.exe".to_string()
    }
}

fn csc_task() -> (ToolTaskExtension<Csc>, Arc<MockBuildEngine>) {
    let engine = Arc::new(MockBuildEngine::new());
    let task = ToolTaskExtension::new(
        Csc,
        &CSC_STRINGS,
        engine.clone(),
        Arc::new(FixedTimeProvider(5000)),
    );
    (task, engine)
}

fn missing_key_tier(err: &TaskError) -> Option<CatalogTier> {
    match err.as_domain() {
        Some(DomainError::MissingResourceKey { tier, .. }) => Some(*tier),
        _ => None,
    }
}

#[test]
fn test_task_local_resources_are_reachable() {
    let (t, engine) = csc_task();

    t.log()
        .log_error_with_code_from_resources(
            "Csc.AssemblyAliasContainsIllegalCharacters",
            &[&"PlanetSide", &"Knights of the Old Republic"],
        )
        .unwrap();
    t.log()
        .log_warning_with_code_from_resources("Csc.InvalidParameter", &[])
        .unwrap();
    t.log()
        .log_message_from_resources(
            "Vbc.ParameterHasInvalidValue",
            &[&"Rome Total War", &"Need for Speed Underground"],
        )
        .unwrap();

    let events = engine.events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].code.as_deref(), Some("CS1001"));
    assert_eq!(events[1].severity, Severity::Warning);
    assert_eq!(
        events[2].severity,
        Severity::Message(MessageImportance::Normal)
    );
    assert!(events.iter().all(|e| e.sender_name == "csc.exe"));
    assert!(events.iter().all(|e| e.timestamp_millis == 5000));
}

#[test]
fn test_resource_access_sanity_check() {
    let (t, engine) = csc_task();

    let err = t
        .log()
        .log_error_from_resources("Beyond Good and Evil", &[])
        .unwrap_err();

    assert_eq!(missing_key_tier(&err), Some(CatalogTier::TaskLocal));
    assert_eq!(engine.count(), 0);
}

#[test]
fn test_runtime_keys_are_not_reachable_from_task_catalog() {
    let (t, engine) = csc_task();

    for key in [
        "Shared.FailedCreatingTempFile",
        "Shared.ParameterTypeMismatch",
        "ToolTask.CommandTooLong",
        "ToolsLocationHelper.InvalidRedistFile",
    ] {
        let err = t.log().log_message_from_resources(key, &[&"x", &"y"]).unwrap_err();
        assert_eq!(missing_key_tier(&err), Some(CatalogTier::TaskLocal), "{}", key);
    }
    assert_eq!(engine.count(), 0);
}

#[test]
fn test_runtime_emits_shared_and_private_messages() {
    let (mut t, engine) = csc_task();

    // Shared tier: parameter type mismatch
    t.bag_mut().set("WarningLevel", "high");
    let err = t
        .get_int_parameter_with_default("WarningLevel", 4)
        .unwrap_err();
    assert!(matches!(
        err.as_domain(),
        Some(DomainError::TypeMismatch {
            expected: ParameterKind::Int,
            ..
        })
    ));
    assert_eq!(engine.last().unwrap().code.as_deref(), Some("BTS1003"));

    // Private tier: oversized command line
    let command_line = "/define:X ".repeat(MAX_COMMAND_LINE_LENGTH / 5);
    assert!(!t.validate_command_line(&command_line).unwrap());
    let event = engine.last().unwrap();
    assert_eq!(event.severity, Severity::Error);
    assert_eq!(event.code.as_deref(), Some("BTU2001"));
    assert!(event.message.contains("csc.exe"));

    assert_eq!(
        t.resolve_tool_path().unwrap().as_deref(),
        Some("/usr/lib/dotnet/csc.exe")
    );
    assert_eq!(engine.errors(), 2);
}

#[test]
fn test_concurrent_logging_through_shared_helper() {
    let (t, engine) = csc_task();
    let log = t.log().clone();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let log = log.clone();
            thread::spawn(move || {
                for j in 0..25 {
                    log.log_message_from_resources(
                        "Vbc.ParameterHasInvalidValue",
                        &[&i, &j],
                    )
                    .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(engine.messages(), 200);
}

#[test]
fn test_tracing_engine_counts_task_diagnostics() {
    let engine = Arc::new(TracingBuildEngine::new());
    let t = ToolTaskExtension::new(
        Csc,
        &CSC_STRINGS,
        engine.clone(),
        Arc::new(FixedTimeProvider(0)),
    );

    t.log()
        .log_warning_with_code_from_resources("Csc.InvalidParameter", &[])
        .unwrap();
    t.report_tool_start_failure(&"file is locked").unwrap();
    assert!(t
        .log()
        .log_error_from_resources("Csc.DoesNotExist", &[])
        .is_err());

    assert_eq!(engine.warning_count(), 2);
    assert_eq!(engine.error_count(), 0);
}
