// Message Catalog Domain Model

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::domain::error::{DomainError, Result};

/// Which layer of the runtime a catalog belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogTier {
    /// Owned by a concrete task (tool/compiler specific diagnostics)
    TaskLocal,
    /// Diagnostics common to every task built on the runtime
    Shared,
    /// Diagnostics internal to runtime utility code
    Private,
}

impl std::fmt::Display for CatalogTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogTier::TaskLocal => write!(f, "task-local"),
            CatalogTier::Shared => write!(f, "shared"),
            CatalogTier::Private => write!(f, "private"),
        }
    }
}

/// Immutable key -> template store.
///
/// Entries are compiled in as a static table; the hash index is built on
/// first lookup. Templates may start with a diagnostic code
/// (`"BTS1001: ..."`), see [`crate::domain::template::extract_message_code`].
///
/// Only task-local catalogs can be built outside this crate, so a task
/// author can never bind a logging helper to the shared or private tier.
pub struct MessageCatalog {
    tier: CatalogTier,
    name: &'static str,
    entries: &'static [(&'static str, &'static str)],
    index: OnceLock<HashMap<&'static str, &'static str>>,
}

impl MessageCatalog {
    /// Create a task-local catalog
    ///
    /// # Example
    /// ```
    /// use buildtask_core::domain::MessageCatalog;
    ///
    /// static CSC_STRINGS: MessageCatalog = MessageCatalog::task_local(
    ///     "Csc",
    ///     &[("Csc.InvalidParameter", "CS2007: Invalid parameter \"{0}\".")],
    /// );
    /// assert!(CSC_STRINGS.contains_key("Csc.InvalidParameter"));
    /// ```
    pub const fn task_local(
        name: &'static str,
        entries: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self::new(CatalogTier::TaskLocal, name, entries)
    }

    pub(crate) const fn new(
        tier: CatalogTier,
        name: &'static str,
        entries: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            tier,
            name,
            entries,
            index: OnceLock::new(),
        }
    }

    pub fn tier(&self) -> CatalogTier {
        self.tier
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn index(&self) -> &HashMap<&'static str, &'static str> {
        self.index.get_or_init(|| self.entries.iter().copied().collect())
    }

    /// Look up a template, `None` when the key is not in this catalog
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.index().get(key).copied()
    }

    /// Look up a template, failing with [`DomainError::MissingResourceKey`]
    pub fn template(&self, key: &str) -> Result<&'static str> {
        self.lookup(key).ok_or_else(|| DomainError::MissingResourceKey {
            tier: self.tier,
            catalog: self.name.to_string(),
            key: key.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index().contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.index().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for MessageCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageCatalog")
            .field("tier", &self.tier)
            .field("name", &self.name)
            .field("entries", &self.entries.len())
            .finish()
    }
}
