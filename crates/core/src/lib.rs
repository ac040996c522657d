// Buildtask Core - Task runtime support & Ports
// NO infrastructure dependencies (ADR-001: Hexagonal Architecture)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;
mod resources;

pub use error::{Result, TaskError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
