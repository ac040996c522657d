// Port Layer - Interfaces for external dependencies

pub mod architecture_query;
pub mod build_engine;
pub mod time_provider; // For deterministic event timestamps

// Re-exports
pub use architecture_query::{ArchitectureQuery, UnsupportedArchitectureQuery};
pub use build_engine::{BuildEngine, BuildEvent, MessageImportance, Severity};
pub use time_provider::TimeProvider;
