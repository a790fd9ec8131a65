use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::record::EntityKind;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The requested record does not exist.
    #[error("{entity} not found with id {id}")]
    NotFound { entity: EntityKind, id: i64 },

    /// Store-level version check failed on save.
    #[error("{entity} {id} version conflict: expected {expected}, found {actual}")]
    VersionConflict {
        entity: EntityKind,
        id: i64,
        expected: i64,
        actual: i64,
    },

    /// A concurrent writer committed between fetch and commit of an update.
    #[error("{entity} was updated by another transaction.")]
    ConcurrentModification { entity: EntityKind },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Shorthand for [`Error::NotFound`].
    pub fn not_found(entity: EntityKind, id: impl Into<i64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = Error::not_found(EntityKind::Product, 5_i64);
        assert_eq!(err.to_string(), "Product not found with id 5");
    }

    #[test]
    fn concurrent_modification_message() {
        let err = Error::ConcurrentModification {
            entity: EntityKind::Category,
        };
        assert_eq!(
            err.to_string(),
            "Category was updated by another transaction."
        );
    }

    #[test]
    fn domain_errors_are_transparent() {
        let err: Error = DomainError::ZeroPageSize.into();
        assert_eq!(err.to_string(), "page size must be greater than 0");
    }
}
