//! # sinkql-core
//!
//! Dialect-aware SQL generation for change-data-capture sinks.
//!
//! Given a resolved destination table and a decoded change record, this
//! crate produces the upsert (or insert, update, delete) statement a
//! particular database expects. The generation algorithm is written once,
//! as the default methods of [`DatabaseDialect`]; each vendor supplies a
//! [`Capabilities`] descriptor and overrides only the hooks where its SQL
//! differs.
//!
//! This crate provides:
//! - Table and record descriptors with per-field binding strategies
//! - Default identifier and literal renderings, including temporal values
//! - The default statement generator for the four upsert families
//! - PostgreSQL, MySQL and generic dialects
//! - Timezone discovery through an injected query executor
//! - An explicitly ordered dialect registry
//!
//! ## Example
//!
//! ```rust
//! use sinkql_core::{DatabaseDialect, DatabaseProduct, DialectConfig, DialectRegistry};
//! use sinkql_core::descriptor::{FieldDescriptor, FieldType, RecordDescriptor, TableDescriptor, TableId};
//!
//! let registry = DialectRegistry::builtin();
//! let dialect = registry
//!     .resolve(&DatabaseProduct::new("MySQL"), &DialectConfig::default())
//!     .unwrap();
//!
//! let table = TableDescriptor::new(TableId::new("orders"));
//! let record = RecordDescriptor::new()
//!     .key(FieldDescriptor::new("id", FieldType::Integer))
//!     .field(FieldDescriptor::new("status", FieldType::Text));
//!
//! let statement = dialect.upsert_statement(&table, &record).unwrap();
//! assert_eq!(
//!     statement.sql,
//!     "INSERT INTO orders (id,status) VALUES (?,?) \
//!      ON DUPLICATE KEY UPDATE status=VALUES(status)"
//! );
//! ```

pub mod builder;
pub mod config;
pub mod descriptor;
pub mod dialect;
pub mod error;
pub mod format;
pub mod registry;

pub use builder::{GeneratedStatement, SqlValue, ToSqlValue};
pub use config::DialectConfig;
pub use dialect::{Capabilities, DatabaseDialect, DialectContext, UpsertSyntax};
pub use error::{Error, Result};
pub use registry::{DatabaseProduct, DialectProvider, DialectRegistry};
