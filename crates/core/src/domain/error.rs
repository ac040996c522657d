// Domain Error Types

use thiserror::Error;

use crate::domain::catalog::CatalogTier;
use crate::domain::parameter::ParameterKind;

/// Invalid-usage errors raised by the domain layer.
///
/// Every variant points at a packaging or programming defect (missing
/// localized string, wrong parameter type), never at a transient condition,
/// so none of them are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Parameter \"{key}\" holds a {found} value but was read as {expected}")]
    TypeMismatch {
        key: String,
        expected: ParameterKind,
        found: ParameterKind,
    },

    #[error("Resource \"{key}\" does not exist in the {tier} catalog \"{catalog}\"")]
    MissingResourceKey {
        tier: CatalogTier,
        catalog: String,
        key: String,
    },

    #[error("Resource \"{key}\" does not carry a diagnostic code")]
    MissingMessageCode { key: String },

    #[error("Resource \"{key}\" could not be formatted: {reason}")]
    Format { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, DomainError>;
