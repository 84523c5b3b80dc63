//! The database-agnostic statement generation algorithm.
//!
//! Every function takes the dialect it generates for, so each identifier,
//! binding and literal goes through that dialect's hooks. The
//! [`DatabaseDialect`] default methods call into this module; a vendor that
//! replaces a whole statement can still reuse the pieces.
//!
//! Projection and target column lists are produced by the same
//! [`DatabaseDialect::column_name_from_field`] mapping, and every pair of
//! lists that must line up positionally is walked in the same field order.

use std::collections::{HashMap, HashSet};

use super::DatabaseDialect;
use crate::builder::{GeneratedStatement, SqlValue, StatementBuilder};
use crate::descriptor::{Binding, FieldDescriptor, RecordDescriptor, TableDescriptor};
use crate::error::{Error, Result};

/// Alias of the synthetic source row in MERGE statements.
pub const INCOMING: &str = "INCOMING";

/// Checks a record before any statement text is produced.
///
/// # Errors
///
/// - [`Error::EmptyKeyFields`] if `require_keys` is set and there are no
///   key fields.
/// - [`Error::EmptyRecord`] if there are no fields at all.
/// - [`Error::OverlappingField`] if a name is both key and non-key.
/// - [`Error::DuplicateColumn`] if two fields map to one column. Unquoted
///   column names are compared case-insensitively.
/// - [`Error::KeyValueTooLong`] if an inlined key literal exceeds the
///   dialect's ceiling for its storage class.
pub fn validate<D>(dialect: &D, record: &RecordDescriptor, require_keys: bool) -> Result<()>
where
    D: DatabaseDialect + ?Sized,
{
    if require_keys && record.key_fields().is_empty() {
        return Err(Error::EmptyKeyFields);
    }
    if record.all_fields().next().is_none() {
        return Err(Error::EmptyRecord);
    }

    let keys: HashSet<&str> = record.key_field_names().collect();
    if let Some(name) = record.non_key_field_names().find(|n| keys.contains(n)) {
        return Err(Error::OverlappingField(name.to_string()));
    }

    // unquoted names are case-insensitive on the target
    let quoted = dialect.context().config().quote_identifiers;
    let mut columns: HashMap<String, &str> = HashMap::new();
    for field in record.all_fields() {
        let column = dialect.column_name_from_field(field);
        let folded = if quoted {
            column.clone()
        } else {
            column.to_lowercase()
        };
        if let Some(first) = columns.get(&folded) {
            return Err(Error::DuplicateColumn {
                column,
                first: (*first).to_string(),
                second: field.name().to_string(),
            });
        }
        columns.insert(folded, field.name());
    }

    for field in record.key_fields() {
        check_key_length(dialect, field)?;
    }
    Ok(())
}

fn check_key_length<D>(dialect: &D, field: &FieldDescriptor) -> Result<()>
where
    D: DatabaseDialect + ?Sized,
{
    let Binding::Literal(value) = field.binding() else {
        return Ok(());
    };
    let (Some(storage), Some(length)) = (field.field_type().key_storage(), value.key_length())
    else {
        return Ok(());
    };
    let limit = dialect.capabilities().max_key_length(storage);
    if length > limit as usize {
        return Err(Error::KeyValueTooLong {
            field: field.name().to_string(),
            storage,
            length,
            limit,
        });
    }
    Ok(())
}

/// Renders `<table>.<column>=<source>.<column>` for a field.
#[must_use]
pub fn assignment_from<D>(dialect: &D, table: &str, source: &str, field: &FieldDescriptor) -> String
where
    D: DatabaseDialect + ?Sized,
{
    let column = dialect.column_name_from_field(field);
    format!("{table}.{column}={source}.{column}")
}

fn append_column<D>(dialect: &D, b: &mut StatementBuilder, field: &FieldDescriptor)
where
    D: DatabaseDialect + ?Sized,
{
    b.append(&dialect.column_name_from_field(field));
}

fn append_binding<D>(dialect: &D, b: &mut StatementBuilder, field: &FieldDescriptor)
where
    D: DatabaseDialect + ?Sized,
{
    b.bind(field, &dialect.column_query_binding(field));
}

fn append_column_equals_binding<D>(dialect: &D, b: &mut StatementBuilder, field: &FieldDescriptor)
where
    D: DatabaseDialect + ?Sized,
{
    append_column(dialect, b, field);
    b.append("=");
    append_binding(dialect, b, field);
}

fn append_key_predicate<D>(dialect: &D, b: &mut StatementBuilder, record: &RecordDescriptor)
where
    D: DatabaseDialect + ?Sized,
{
    b.append_list(" AND ", record.key_fields(), |b, field| {
        append_column_equals_binding(dialect, b, field);
    });
}

/// `MERGE INTO ... USING (SELECT ...) AS INCOMING ON (...) ...`
///
/// The source projection lists key fields then non-key fields; the insert
/// column and value lists both list non-key fields then key fields.
#[must_use]
pub fn merge<D>(dialect: &D, table: &TableDescriptor, record: &RecordDescriptor) -> GeneratedStatement
where
    D: DatabaseDialect + ?Sized,
{
    let target = dialect.qualified_table_name(table.id());
    let mut b = StatementBuilder::new();

    b.append("MERGE INTO ").append(&target).append(" USING (SELECT ");
    b.append_lists(", ", record.key_fields(), record.non_key_fields(), |b, field| {
        append_binding(dialect, b, field);
        b.append(" AS ");
        append_column(dialect, b, field);
    });
    if let Some(source) = dialect.merge_source_from(table) {
        b.append(" FROM ").append(&source);
    }
    b.append(") AS ").append(INCOMING).append(" ON (");
    b.append_list(" AND ", record.key_fields(), |b, field| {
        b.append(&assignment_from(dialect, &target, INCOMING, field));
    });
    b.append(")");

    if !record.non_key_fields().is_empty() {
        b.append(" WHEN MATCHED THEN UPDATE SET ");
        b.append_list(",", record.non_key_fields(), |b, field| {
            b.append(&assignment_from(dialect, &target, INCOMING, field));
        });
    }

    b.append(" WHEN NOT MATCHED THEN INSERT (");
    b.append_lists(",", record.non_key_fields(), record.key_fields(), |b, field| {
        append_column(dialect, b, field);
    });
    b.append(") VALUES (");
    b.append_lists(",", record.non_key_fields(), record.key_fields(), |b, field| {
        b.append(INCOMING).append(".");
        append_column(dialect, b, field);
    });
    b.append(")");
    b.build()
}

fn append_insert_prefix<D>(
    dialect: &D,
    b: &mut StatementBuilder,
    table: &TableDescriptor,
    record: &RecordDescriptor,
) where
    D: DatabaseDialect + ?Sized,
{
    b.append("INSERT INTO ")
        .append(&dialect.qualified_table_name(table.id()))
        .append(" (");
    b.append_lists(",", record.key_fields(), record.non_key_fields(), |b, field| {
        append_column(dialect, b, field);
    });
    b.append(") VALUES (");
    b.append_lists(",", record.key_fields(), record.non_key_fields(), |b, field| {
        append_binding(dialect, b, field);
    });
    b.append(")");
}

/// `INSERT INTO ... (...) VALUES (...)`, key fields first.
#[must_use]
pub fn insert<D>(dialect: &D, table: &TableDescriptor, record: &RecordDescriptor) -> GeneratedStatement
where
    D: DatabaseDialect + ?Sized,
{
    let mut b = StatementBuilder::new();
    append_insert_prefix(dialect, &mut b, table, record);
    b.build()
}

/// `INSERT ... ON CONFLICT (<keys>) DO UPDATE SET <col>=EXCLUDED.<col>`,
/// or `DO NOTHING` when there are no non-key fields.
#[must_use]
pub fn insert_on_conflict<D>(
    dialect: &D,
    table: &TableDescriptor,
    record: &RecordDescriptor,
) -> GeneratedStatement
where
    D: DatabaseDialect + ?Sized,
{
    let mut b = StatementBuilder::new();
    append_insert_prefix(dialect, &mut b, table, record);
    b.append(" ON CONFLICT (");
    b.append_list(",", record.key_fields(), |b, field| {
        append_column(dialect, b, field);
    });
    b.append(")");
    if record.non_key_fields().is_empty() {
        b.append(" DO NOTHING");
    } else {
        b.append(" DO UPDATE SET ");
        b.append_list(",", record.non_key_fields(), |b, field| {
            let column = dialect.column_name_from_field(field);
            b.append(&format!("{column}=EXCLUDED.{column}"));
        });
    }
    b.build()
}

/// `INSERT ... ON DUPLICATE KEY UPDATE <col>=VALUES(<col>)`.
///
/// A key-only record assigns its key columns onto themselves so the
/// statement stays a no-op on conflict.
#[must_use]
pub fn insert_on_duplicate_key<D>(
    dialect: &D,
    table: &TableDescriptor,
    record: &RecordDescriptor,
) -> GeneratedStatement
where
    D: DatabaseDialect + ?Sized,
{
    let mut b = StatementBuilder::new();
    append_insert_prefix(dialect, &mut b, table, record);
    b.append(" ON DUPLICATE KEY UPDATE ");
    let updated = if record.non_key_fields().is_empty() {
        record.key_fields()
    } else {
        record.non_key_fields()
    };
    b.append_list(",", updated, |b, field| {
        let column = dialect.column_name_from_field(field);
        b.append(&format!("{column}=VALUES({column})"));
    });
    b.build()
}

/// `UPDATE ...; INSERT INTO ... SELECT ... WHERE NOT EXISTS (...)`.
///
/// For engines without a single-statement upsert. Key-only records emit
/// just the guarded insert.
#[must_use]
pub fn update_then_insert<D>(
    dialect: &D,
    table: &TableDescriptor,
    record: &RecordDescriptor,
) -> GeneratedStatement
where
    D: DatabaseDialect + ?Sized,
{
    let target = dialect.qualified_table_name(table.id());
    let mut b = StatementBuilder::new();

    if !record.non_key_fields().is_empty() {
        append_update(dialect, &mut b, &target, record);
        b.append("; ");
    }

    b.append("INSERT INTO ").append(&target).append(" (");
    b.append_lists(",", record.key_fields(), record.non_key_fields(), |b, field| {
        append_column(dialect, b, field);
    });
    b.append(") SELECT ");
    b.append_lists(",", record.key_fields(), record.non_key_fields(), |b, field| {
        append_binding(dialect, b, field);
    });
    b.append(" WHERE NOT EXISTS (SELECT 1 FROM ").append(&target).append(" WHERE ");
    append_key_predicate(dialect, &mut b, record);
    b.append(")");
    b.build()
}

fn append_update<D>(dialect: &D, b: &mut StatementBuilder, target: &str, record: &RecordDescriptor)
where
    D: DatabaseDialect + ?Sized,
{
    b.append("UPDATE ").append(target).append(" SET ");
    b.append_list(",", record.non_key_fields(), |b, field| {
        append_column_equals_binding(dialect, b, field);
    });
    b.append(" WHERE ");
    append_key_predicate(dialect, b, record);
}

/// `UPDATE ... SET <non-key>=... WHERE <key>=...`.
#[must_use]
pub fn update<D>(dialect: &D, table: &TableDescriptor, record: &RecordDescriptor) -> GeneratedStatement
where
    D: DatabaseDialect + ?Sized,
{
    let mut b = StatementBuilder::new();
    append_update(dialect, &mut b, &dialect.qualified_table_name(table.id()), record);
    b.build()
}

/// `DELETE FROM ... WHERE <key>=...`.
#[must_use]
pub fn delete<D>(dialect: &D, table: &TableDescriptor, record: &RecordDescriptor) -> GeneratedStatement
where
    D: DatabaseDialect + ?Sized,
{
    let mut b = StatementBuilder::new();
    b.append("DELETE FROM ")
        .append(&dialect.qualified_table_name(table.id()))
        .append(" WHERE ");
    append_key_predicate(dialect, &mut b, record);
    b.build()
}

/// Renders a value through the dialect's literal hooks.
#[must_use]
pub fn format_value<D>(dialect: &D, value: &SqlValue) -> String
where
    D: DatabaseDialect + ?Sized,
{
    match value {
        SqlValue::Null => String::from("NULL"),
        SqlValue::Bool(b) => dialect.format_boolean(*b),
        SqlValue::Int(n) => n.to_string(),
        SqlValue::Float(f) => dialect.format_float(*f),
        SqlValue::Decimal(d) => d.clone(),
        SqlValue::Text(s) => dialect.format_string(s),
        SqlValue::Blob(bytes) => dialect.format_binary(bytes),
        SqlValue::Date(d) => dialect.format_date(*d),
        SqlValue::Time(t) => dialect.format_time(*t),
        SqlValue::TimeWithTimeZone(t) => dialect.format_time_with_time_zone(t),
        SqlValue::DateTime(dt) => dialect.format_date_time(*dt),
        SqlValue::DateTimeWithNanos(dt) => dialect.format_date_time_with_nanos(*dt),
        SqlValue::Timestamp(ts) => dialect.format_timestamp(ts),
        SqlValue::TimestampWithTimeZone(ts) => dialect.format_timestamp_with_time_zone(ts),
    }
}
