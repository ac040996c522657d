// Buildtask Infrastructure - System Adapters
// Implements: ArchitectureQuery, BuildEngine (ADR-002)

pub mod sysinfo_architecture_query;
pub mod tracing_build_engine;

pub use sysinfo_architecture_query::SysinfoArchitectureQuery;
pub use tracing_build_engine::TracingBuildEngine;
