//! Statement assembly primitives.
//!
//! [`StatementBuilder`] appends fragments the way a dialect's generation
//! hooks produce them and records which fields must be bound to the
//! placeholders it emits.
//!
//! # Example
//!
//! ```rust
//! use sinkql_core::builder::StatementBuilder;
//!
//! let mut builder = StatementBuilder::new();
//! builder.append("DELETE FROM orders WHERE ");
//! builder.append_list(" AND ", ["id", "region"], |b, column| {
//!     b.append(column).append("=?");
//! });
//!
//! assert_eq!(builder.build().sql, "DELETE FROM orders WHERE id=? AND region=?");
//! ```

mod statement;
pub mod value;

pub use statement::{GeneratedStatement, StatementBuilder};
pub use value::{SqlValue, ToSqlValue};
