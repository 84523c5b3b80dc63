//! # sinkql-snowflake
//!
//! Snowflake dialect for `sinkql-core`.
//!
//! # How Snowflake differs from the default dialect
//!
//! - **[Identifier resolution]**: unquoted identifiers are stored and
//!   resolved in upper case, so unquoted names are emitted upper-cased.
//! - **[MERGE]**: upserts use native `MERGE`. The synthetic source row
//!   selects from the target table itself.
//! - **Typed literals**: temporal literals carry an explicit cast
//!   (`::date`, `::time`, `::timestamp`, `::timestamp_tz`) after the
//!   default rendering.
//! - **[Parameters]**: the session timezone is read with
//!   `SHOW PARAMETERS LIKE 'TIMEZONE'` from the `value` column.
//! - **Lengths**: `VARCHAR` keys up to 16 MiB and `BINARY` up to 8 MiB.
//!
//! [Identifier resolution]: https://docs.snowflake.com/en/sql-reference/identifiers-syntax
//! [MERGE]: https://docs.snowflake.com/en/sql-reference/sql/merge
//! [Parameters]: https://docs.snowflake.com/en/sql-reference/parameters
//!
//! ## Example
//!
//! ```rust
//! use sinkql_core::{DatabaseDialect, DatabaseProduct, DialectConfig, DialectRegistry};
//! use sinkql_core::descriptor::{FieldDescriptor, FieldType, RecordDescriptor, TableDescriptor, TableId};
//! use sinkql_snowflake::with_snowflake;
//!
//! let registry = with_snowflake(DialectRegistry::builtin());
//! let dialect = registry
//!     .resolve(&DatabaseProduct::new("Snowflake"), &DialectConfig::default())
//!     .unwrap();
//!
//! let table = TableDescriptor::new(TableId::new("orders"));
//! let record = RecordDescriptor::new()
//!     .key(FieldDescriptor::new("id", FieldType::Integer))
//!     .field(FieldDescriptor::new("status", FieldType::Text));
//!
//! let sql = dialect.upsert_statement(&table, &record).unwrap().sql;
//! assert!(sql.starts_with("MERGE INTO ORDERS USING (SELECT ? AS ID, ? AS STATUS FROM ORDERS)"));
//! ```

mod dialect;
mod provider;

pub use dialect::SnowflakeDialect;
pub use provider::{with_snowflake, SnowflakeProvider, PLACEHOLDER_PRODUCT_NAME, PRODUCT_NAME};
