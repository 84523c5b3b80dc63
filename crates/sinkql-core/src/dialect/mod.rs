//! SQL dialect support.
//!
//! [`DatabaseDialect`] is the record of generation hooks. Its default
//! methods are the database-agnostic generator; a vendor implements the
//! trait, supplies its [`Capabilities`], and overrides only the hooks where
//! it differs. An override replaces the hook entirely. Default literal
//! renderings live in [`crate::format`] so an override can build on them.
//!
//! # Example
//!
//! ```rust
//! use sinkql_core::config::DialectConfig;
//! use sinkql_core::descriptor::{FieldDescriptor, FieldType, RecordDescriptor, TableDescriptor, TableId};
//! use sinkql_core::dialect::{DatabaseDialect, PostgresDialect};
//!
//! let dialect = PostgresDialect::new(DialectConfig::default());
//! let table = TableDescriptor::new(TableId::new("orders"));
//! let record = RecordDescriptor::new()
//!     .key(FieldDescriptor::new("id", FieldType::Integer))
//!     .field(FieldDescriptor::new("status", FieldType::Text));
//!
//! let statement = dialect.upsert_statement(&table, &record).unwrap();
//! assert_eq!(
//!     statement.sql,
//!     "INSERT INTO orders (id,status) VALUES (?,?) \
//!      ON CONFLICT (id) DO UPDATE SET status=EXCLUDED.status"
//! );
//! assert_eq!(statement.parameters, vec!["id", "status"]);
//! ```

mod capabilities;
pub mod generator;
mod generic;
mod mysql;
mod postgres;
pub mod timezone;

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

pub use capabilities::{Capabilities, UpsertSyntax};
pub use generic::GenericDialect;
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use timezone::{QueryError, QueryExecutor, ResultRow, TimezoneCache, TimezoneDiscovery};

use crate::builder::{GeneratedStatement, SqlValue};
use crate::config::DialectConfig;
use crate::descriptor::{Binding, FieldDescriptor, RecordDescriptor, TableDescriptor, TableId};
use crate::error::Result;
use crate::format;

/// Per-instance state a dialect carries: its configuration and the cached
/// database timezone.
#[derive(Debug, Default)]
pub struct DialectContext {
    config: DialectConfig,
    timezone: TimezoneCache,
}

impl DialectContext {
    /// Creates a context with an empty timezone cache.
    #[must_use]
    pub fn new(config: DialectConfig) -> Self {
        Self {
            config,
            timezone: TimezoneCache::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &DialectConfig {
        &self.config
    }

    /// Returns the timezone cache.
    #[must_use]
    pub const fn timezone(&self) -> &TimezoneCache {
        &self.timezone
    }
}

/// Trait for vendor-specific statement generation.
///
/// Implementations must be cheap to share: generation takes `&self` and
/// reads only immutable state, so one instance serves concurrent callers.
pub trait DatabaseDialect: fmt::Debug + Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Returns the vendor's capability descriptor.
    fn capabilities(&self) -> &Capabilities;

    /// Returns the per-instance context.
    fn context(&self) -> &DialectContext;

    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Renders an identifier, quoted when the configuration asks for it
    /// and otherwise cased per [`Capabilities::uppercase_unquoted_identifiers`].
    fn to_identifier(&self, name: &str) -> String {
        format::identifier(
            name,
            self.identifier_quote(),
            self.capabilities().identifier_casing(),
            self.context().config().quote_identifiers,
        )
    }

    /// Renders a table name with its catalog and schema qualifiers.
    fn qualified_table_name(&self, id: &TableId) -> String {
        id.parts()
            .map(|part| self.to_identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Maps a field onto its rendered target column.
    ///
    /// Every column list in a statement goes through this one mapping.
    fn column_name_from_field(&self, field: &FieldDescriptor) -> String {
        self.to_identifier(field.column_name())
    }

    // =========================================================================
    // Bindings and literals
    // =========================================================================

    /// Returns the parameter placeholder.
    fn placeholder(&self) -> &'static str {
        "?"
    }

    /// Renders the value expression for a field.
    fn column_query_binding(&self, field: &FieldDescriptor) -> String {
        match field.binding() {
            Binding::Placeholder => self.placeholder().to_string(),
            Binding::Literal(value) => self.format_value(value),
            Binding::Expression { sql, .. } => sql.clone(),
        }
    }

    /// Renders a literal, dispatching temporal values to their hooks.
    fn format_value(&self, value: &SqlValue) -> String {
        generator::format_value(self, value)
    }

    /// Renders a string literal.
    fn format_string(&self, value: &str) -> String {
        format::string(value)
    }

    /// Renders a floating point literal.
    fn format_float(&self, value: f64) -> String {
        format::float(value)
    }

    /// Renders a boolean literal.
    fn format_boolean(&self, value: bool) -> String {
        format::boolean(value).to_string()
    }

    /// Renders a binary literal.
    fn format_binary(&self, value: &[u8]) -> String {
        format::binary(value)
    }

    /// Renders a date literal.
    fn format_date(&self, value: NaiveDate) -> String {
        format::date(value)
    }

    /// Renders a time literal.
    fn format_time(&self, value: NaiveTime) -> String {
        format::time(value)
    }

    /// Renders a zoned time literal.
    fn format_time_with_time_zone(&self, value: &str) -> String {
        format::time_with_time_zone(value)
    }

    /// Renders a local date-time literal.
    fn format_date_time(&self, value: NaiveDateTime) -> String {
        format::date_time(value)
    }

    /// Renders a nanosecond-precision date-time literal.
    ///
    /// Defaults to [`format_date_time`](Self::format_date_time); override
    /// only when the vendor types the two differently.
    fn format_date_time_with_nanos(&self, value: NaiveDateTime) -> String {
        self.format_date_time(value)
    }

    /// Renders an offset timestamp literal.
    fn format_timestamp(&self, value: &DateTime<FixedOffset>) -> String {
        format::timestamp(value)
    }

    /// Renders a zoned timestamp literal.
    fn format_timestamp_with_time_zone(&self, value: &str) -> String {
        format::timestamp_with_time_zone(value)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Returns the relation the MERGE source projection selects from, if
    /// the engine needs one.
    fn merge_source_from(&self, _table: &TableDescriptor) -> Option<String> {
        None
    }

    /// Generates an insert-or-update statement.
    ///
    /// # Errors
    ///
    /// Fails with an input-validation error (see [`generator::validate`])
    /// before producing any text.
    fn upsert_statement(
        &self,
        table: &TableDescriptor,
        record: &RecordDescriptor,
    ) -> Result<GeneratedStatement> {
        generator::validate(self, record, true)?;
        let statement = match self.capabilities().upsert_syntax {
            UpsertSyntax::NativeMerge => generator::merge(self, table, record),
            UpsertSyntax::InsertOnConflict => generator::insert_on_conflict(self, table, record),
            UpsertSyntax::InsertOnDuplicateKey => {
                generator::insert_on_duplicate_key(self, table, record)
            }
            UpsertSyntax::UpdateThenInsert => generator::update_then_insert(self, table, record),
        };
        debug!(dialect = self.name(), table = %table.id(), sql = %statement, "Generated upsert");
        Ok(statement)
    }

    /// Generates a plain insert.
    ///
    /// # Errors
    ///
    /// Fails on an empty record or any other validation error.
    fn insert_statement(
        &self,
        table: &TableDescriptor,
        record: &RecordDescriptor,
    ) -> Result<GeneratedStatement> {
        generator::validate(self, record, false)?;
        let statement = generator::insert(self, table, record);
        debug!(dialect = self.name(), table = %table.id(), sql = %statement, "Generated insert");
        Ok(statement)
    }

    /// Generates an update of the non-key columns matched on the keys.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NoNonKeyFields`](crate::Error::NoNonKeyFields)
    /// when there is nothing to set, or any other validation error.
    fn update_statement(
        &self,
        table: &TableDescriptor,
        record: &RecordDescriptor,
    ) -> Result<GeneratedStatement> {
        generator::validate(self, record, true)?;
        if record.non_key_fields().is_empty() {
            return Err(crate::Error::NoNonKeyFields);
        }
        let statement = generator::update(self, table, record);
        debug!(dialect = self.name(), table = %table.id(), sql = %statement, "Generated update");
        Ok(statement)
    }

    /// Generates a delete matched on the keys.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::EmptyKeyFields`](crate::Error::EmptyKeyFields)
    /// or any other validation error.
    fn delete_statement(
        &self,
        table: &TableDescriptor,
        record: &RecordDescriptor,
    ) -> Result<GeneratedStatement> {
        generator::validate(self, record, true)?;
        let statement = generator::delete(self, table, record);
        debug!(dialect = self.name(), table = %table.id(), sql = %statement, "Generated delete");
        Ok(statement)
    }

    // =========================================================================
    // Timezone
    // =========================================================================

    /// Discovers the database timezone once and caches the outcome.
    ///
    /// Returns `None` when the vendor has no discovery query or discovery
    /// failed; both are cached until [`reset_timezone`](Self::reset_timezone).
    fn discover_timezone(&self, executor: &dyn QueryExecutor) -> Option<String> {
        self.context().timezone().get_or_discover(|| {
            self.capabilities()
                .timezone_discovery
                .and_then(|discovery| discovery.discover(self.name(), executor))
        })
    }

    /// Returns the discovered timezone, or the configured default.
    fn database_timezone(&self) -> String {
        self.context()
            .timezone()
            .get()
            .flatten()
            .unwrap_or_else(|| self.context().config().default_timezone.clone())
    }

    /// Forgets the discovered timezone.
    fn reset_timezone(&self) {
        self.context().timezone().clear();
    }
}
