// Runtime-owned message catalogs
//
// Both catalogs are crate-private: task crates can only reach them through
// the restricted helpers on `ToolTaskExtension`.

mod shared;
mod utilities;

pub(crate) use shared::SHARED_STRINGS;
pub(crate) use utilities::UTILITIES_STRINGS;
