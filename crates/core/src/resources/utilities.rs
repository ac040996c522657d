// Private catalog: diagnostics internal to runtime utility code

use crate::domain::catalog::{CatalogTier, MessageCatalog};

pub(crate) static UTILITIES_STRINGS: MessageCatalog = MessageCatalog::new(
    CatalogTier::Private,
    "Utilities",
    &[
        (
            "ToolTask.CommandTooLong",
            "BTU2001: The command line for the \"{0}\" task is too long. Command lines longer than {1} characters are likely to fail.",
        ),
        (
            "ToolTask.CouldNotStartToolExecutable",
            "BTU2002: The \"{0}\" tool could not be run. {1}",
        ),
        (
            "ToolTask.ToolExecutableNotFound",
            "BTU2003: The path to the \"{0}\" tool could not be determined.",
        ),
        (
            "ToolTask.CommandLine",
            "Command line for \"{0}\": {1}",
        ),
        (
            "ToolsLocationHelper.InvalidRedistFile",
            "BTU2101: The redist list \"{0}\" could not be read. {1}",
        ),
    ],
);
