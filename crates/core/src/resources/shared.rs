// Shared catalog: diagnostics common to every task built on the runtime

use crate::domain::catalog::{CatalogTier, MessageCatalog};

pub(crate) static SHARED_STRINGS: MessageCatalog = MessageCatalog::new(
    CatalogTier::Shared,
    "Shared",
    &[
        (
            "Shared.FailedCreatingTempFile",
            "BTS1001: Could not create a temporary file. {0}",
        ),
        (
            "Shared.CannotConvertStringToBool",
            "BTS1002: \"{0}\" is not a valid value for a boolean parameter.",
        ),
        (
            "Shared.CannotConvertStringToInt",
            "BTS1004: \"{0}\" is not a valid value for an integer parameter.",
        ),
        (
            "Shared.ParameterTypeMismatch",
            "BTS1003: Parameter \"{0}\" was read as {1} but holds a {2} value.",
        ),
    ],
);
