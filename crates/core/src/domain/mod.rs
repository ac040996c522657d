// Domain Layer - Parameters, message catalogs and architecture values

pub mod architecture;
pub mod catalog;
pub mod error;
pub mod parameter;
pub mod template;

// Re-exports
pub use architecture::{HostArchitecture, NativeArchitectureCode, ProcessorArchitecture};
pub use catalog::{CatalogTier, MessageCatalog};
pub use error::DomainError;
pub use parameter::{FromParameterValue, ParameterBag, ParameterKind, ParameterValue};
