//! Traits shared by every persisted record type.
//!
//! A [`Record`] ties a row type to its identifier, its creation payload,
//! its filter conditions, and its sortable properties. The store port and
//! the optimistic update protocol are written once against this trait.

use std::fmt;

use serde::Serialize;

use super::error::DomainError;
use super::page::SortField;

/// Kind of persisted record, used in log fields and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Product,
    Category,
}

impl EntityKind {
    /// Human-readable name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Category => "Category",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A versioned record persisted by a record store.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    /// Store-assigned identifier.
    type Id: Copy + fmt::Display + Into<i64> + Send + Sync + 'static;
    /// Validated payload used to create a new record.
    type Draft: Send + Sync;
    /// Single filter condition over this record's fields.
    type Condition: Send + Sync;
    /// Properties a listing may be sorted by.
    type SortField: SortField;

    /// Record type, for messages.
    const KIND: EntityKind;

    /// Identifier of this record.
    fn id(&self) -> Self::Id;

    /// Optimistic-concurrency token last read from the store.
    fn version(&self) -> i64;

    /// Overwrite the version token. Only stores call this, after a commit.
    fn set_version(&mut self, version: i64);
}

/// Reject names without a single non-whitespace character.
///
/// # Errors
/// Returns [`DomainError::BlankName`] for empty or whitespace-only names.
pub fn validate_name(entity: EntityKind, name: String) -> Result<String, DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::BlankName { entity });
    }
    Ok(name)
}
