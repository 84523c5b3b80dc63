//! Per-vendor tunables.

use super::timezone::TimezoneDiscovery;
use crate::descriptor::KeyStorage;
use crate::format::IdentifierCasing;

/// Statement shape used to express "insert or update on key match".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpsertSyntax {
    /// `MERGE INTO ... USING ... WHEN MATCHED ... WHEN NOT MATCHED ...`
    #[default]
    NativeMerge,
    /// `INSERT ... ON CONFLICT (...) DO UPDATE SET ...`
    InsertOnConflict,
    /// `INSERT ... ON DUPLICATE KEY UPDATE ...`
    InsertOnDuplicateKey,
    /// `UPDATE ...; INSERT ... WHERE NOT EXISTS (...)`
    UpdateThenInsert,
}

/// The capability descriptor of a vendor.
///
/// Constructed once per dialect, usually as a `const`, and shared by every
/// statement generated for that vendor.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    /// Whether the engine folds unquoted identifiers to upper case.
    pub uppercase_unquoted_identifiers: bool,
    /// Longest character key value, in characters.
    pub max_varchar_key_length: u32,
    /// Longest national character key value, in characters.
    pub max_nvarchar_key_length: u32,
    /// Longest binary value, in bytes.
    pub max_varbinary_length: u32,
    /// How to ask the server for its timezone, if it can be asked.
    pub timezone_discovery: Option<TimezoneDiscovery>,
    /// Upsert statement family.
    pub upsert_syntax: UpsertSyntax,
}

impl Capabilities {
    /// Vendor-agnostic fallbacks.
    pub const DEFAULT: Self = Self {
        uppercase_unquoted_identifiers: false,
        max_varchar_key_length: 255,
        max_nvarchar_key_length: 255,
        max_varbinary_length: 255,
        timezone_discovery: None,
        upsert_syntax: UpsertSyntax::NativeMerge,
    };

    /// Returns the ceiling for a key column of the given storage class.
    #[must_use]
    pub const fn max_key_length(&self, storage: KeyStorage) -> u32 {
        match storage {
            KeyStorage::Varchar => self.max_varchar_key_length,
            KeyStorage::NVarchar => self.max_nvarchar_key_length,
            KeyStorage::Varbinary => self.max_varbinary_length,
        }
    }

    /// Returns the casing policy for unquoted identifiers.
    #[must_use]
    pub const fn identifier_casing(&self) -> IdentifierCasing {
        if self.uppercase_unquoted_identifiers {
            IdentifierCasing::UppercaseWhenUnquoted
        } else {
            IdentifierCasing::AsIs
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::DEFAULT
    }
}
