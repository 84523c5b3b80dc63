//! Error types for statement generation and dialect resolution.

use crate::descriptor::KeyStorage;

/// Errors raised while generating statements or resolving dialects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The record has no key fields to match on.
    #[error("record has no key fields; cannot build a match predicate")]
    EmptyKeyFields,

    /// The record has no fields at all.
    #[error("record has no fields")]
    EmptyRecord,

    /// The statement needs non-key fields but the record has none.
    #[error("record has no non-key fields to update")]
    NoNonKeyFields,

    /// A field is declared as both a key and a non-key field.
    #[error("field '{0}' is declared as both a key and a non-key field")]
    OverlappingField(String),

    /// Two fields map onto the same target column.
    #[error("fields '{first}' and '{second}' both map to column {column}")]
    DuplicateColumn {
        /// The rendered target column.
        column: String,
        /// The first field mapped to the column.
        first: String,
        /// The second field mapped to the column.
        second: String,
    },

    /// An inlined key value exceeds the vendor ceiling for its storage class.
    #[error("key field '{field}' is {length} long, over the {storage:?} key limit of {limit}")]
    KeyValueTooLong {
        /// The offending key field.
        field: String,
        /// Storage class of the key column.
        storage: KeyStorage,
        /// Measured length of the value.
        length: usize,
        /// Vendor ceiling.
        limit: u32,
    },

    /// No registered dialect supports the detected database product.
    #[error("no dialect registered for database product '{0}'")]
    DialectNotFound(String),

    /// An explicitly requested dialect name is not registered.
    #[error("unknown dialect '{0}'")]
    UnknownDialect(String),
}

impl Error {
    /// Returns whether the error was caused by malformed generation input.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyKeyFields
                | Self::EmptyRecord
                | Self::NoNonKeyFields
                | Self::OverlappingField(_)
                | Self::DuplicateColumn { .. }
                | Self::KeyValueTooLong { .. }
        )
    }
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
