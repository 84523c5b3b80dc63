//! Tests for Snowflake MERGE generation, typed literals and timezone
//! discovery.

use std::cell::Cell;

use chrono::{DateTime, NaiveDate};
use sinkql_core::descriptor::{
    Binding, FieldDescriptor, FieldType, RecordDescriptor, TableDescriptor, TableId,
};
use sinkql_core::dialect::{QueryError, QueryExecutor, ResultRow};
use sinkql_core::{format, DatabaseDialect, DialectConfig, Error, SqlValue};
use sinkql_snowflake::SnowflakeDialect;

fn orders() -> TableDescriptor {
    TableDescriptor::new(TableId::new("orders"))
}

fn order_record() -> RecordDescriptor {
    RecordDescriptor::new()
        .key(FieldDescriptor::new("id", FieldType::Integer))
        .field(FieldDescriptor::new("status", FieldType::Text))
}

#[test]
fn merge_orders_example() {
    let dialect = SnowflakeDialect::default();
    let statement = dialect.upsert_statement(&orders(), &order_record()).unwrap();

    assert_eq!(
        statement.sql,
        "MERGE INTO ORDERS USING (SELECT ? AS ID, ? AS STATUS FROM ORDERS) AS INCOMING \
         ON (ORDERS.ID=INCOMING.ID) \
         WHEN MATCHED THEN UPDATE SET ORDERS.STATUS=INCOMING.STATUS \
         WHEN NOT MATCHED THEN INSERT (STATUS,ID) VALUES (INCOMING.STATUS,INCOMING.ID)"
    );
    assert!(statement.sql.contains("MERGE INTO ORDERS"));
    assert!(statement.sql.contains("ON (ORDERS.ID=INCOMING.ID)"));
    assert!(statement
        .sql
        .contains("WHEN MATCHED THEN UPDATE SET ORDERS.STATUS=INCOMING.STATUS"));
    assert!(statement
        .sql
        .contains("INSERT (STATUS,ID) VALUES (INCOMING.STATUS,INCOMING.ID)"));
    assert_eq!(statement.parameters, vec!["id", "status"]);
}

#[test]
fn merge_qualified_composite_key() {
    let dialect = SnowflakeDialect::default();
    let table = TableDescriptor::new(TableId::new("order_lines").with_schema("sales"));
    let record = RecordDescriptor::new()
        .key(FieldDescriptor::new("order_id", FieldType::Integer))
        .key(FieldDescriptor::new("line_no", FieldType::Integer))
        .field(FieldDescriptor::new("sku", FieldType::Text))
        .field(FieldDescriptor::new("qty", FieldType::Integer));

    let sql = dialect.upsert_statement(&table, &record).unwrap().sql;
    assert_eq!(
        sql,
        "MERGE INTO SALES.ORDER_LINES USING (SELECT ? AS ORDER_ID, ? AS LINE_NO, ? AS SKU, ? AS QTY \
         FROM SALES.ORDER_LINES) AS INCOMING \
         ON (SALES.ORDER_LINES.ORDER_ID=INCOMING.ORDER_ID AND SALES.ORDER_LINES.LINE_NO=INCOMING.LINE_NO) \
         WHEN MATCHED THEN UPDATE SET SALES.ORDER_LINES.SKU=INCOMING.SKU,SALES.ORDER_LINES.QTY=INCOMING.QTY \
         WHEN NOT MATCHED THEN INSERT (SKU,QTY,ORDER_ID,LINE_NO) \
         VALUES (INCOMING.SKU,INCOMING.QTY,INCOMING.ORDER_ID,INCOMING.LINE_NO)"
    );
}

#[test]
fn merge_key_only_omits_matched_clause() {
    let dialect = SnowflakeDialect::default();
    let record = RecordDescriptor::new().key(FieldDescriptor::new("id", FieldType::Integer));

    let sql = dialect.upsert_statement(&orders(), &record).unwrap().sql;
    assert!(!sql.contains("WHEN MATCHED"));
    assert!(sql.ends_with("WHEN NOT MATCHED THEN INSERT (ID) VALUES (INCOMING.ID)"));
}

#[test]
fn merge_with_quoted_identifiers() {
    let dialect = SnowflakeDialect::new(DialectConfig::new().quote_identifiers(true));
    let sql = dialect
        .upsert_statement(&orders(), &order_record())
        .unwrap()
        .sql;
    assert!(sql.starts_with("MERGE INTO \"orders\" USING (SELECT ? AS \"id\", ? AS \"status\" FROM \"orders\")"));
    assert!(sql.contains("ON (\"orders\".\"id\"=INCOMING.\"id\")"));
}

#[test]
fn merge_inlines_typed_literals() {
    let dialect = SnowflakeDialect::default();
    let created = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(10, 15, 30)
        .unwrap();
    let record = RecordDescriptor::new()
        .key(FieldDescriptor::new("id", FieldType::Integer).with_value(7_i64))
        .field(FieldDescriptor::new("created", FieldType::DateTime).with_value(created))
        .field(
            FieldDescriptor::new("shipped_on", FieldType::Date)
                .with_value(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()),
        );

    let statement = dialect.upsert_statement(&orders(), &record).unwrap();
    assert!(statement.sql.starts_with(
        "MERGE INTO ORDERS USING (SELECT 7 AS ID, '2024-03-01T10:15:30'::timestamp AS CREATED, \
         '2024-03-04'::date AS SHIPPED_ON FROM ORDERS)"
    ));
    assert!(statement.parameters.is_empty());
}

#[test]
fn empty_keys_fail_without_text() {
    let dialect = SnowflakeDialect::default();
    let record = RecordDescriptor::new().field(FieldDescriptor::new("status", FieldType::Text));

    let err = dialect.upsert_statement(&orders(), &record).unwrap_err();
    assert_eq!(err, Error::EmptyKeyFields);
    assert!(err.is_invalid_input());
}

#[test]
fn generation_is_idempotent() {
    let dialect = SnowflakeDialect::default();
    let first = dialect.upsert_statement(&orders(), &order_record()).unwrap();
    let second = dialect.upsert_statement(&orders(), &order_record()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn temporal_suffixes_strip_to_default_rendering() {
    let dialect = SnowflakeDialect::default();
    let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
    let date_time = date.and_hms_micro_opt(23, 59, 59, 999_999).unwrap();
    let timestamp = DateTime::parse_from_rfc3339("2023-12-31T23:59:59-05:00").unwrap();

    let timestamp_out = dialect.format_timestamp(&timestamp);
    assert!(timestamp_out.ends_with(":timestamp"));
    assert_eq!(
        timestamp_out.strip_suffix("::timestamp"),
        Some(format::timestamp(&timestamp).as_str())
    );

    let date_out = dialect.format_date(date);
    assert!(date_out.ends_with(":date"));
    assert_eq!(
        date_out.strip_suffix("::date"),
        Some(format::date(date).as_str())
    );

    assert_eq!(
        dialect.format_date_time(date_time).strip_suffix("::timestamp"),
        Some(format::date_time(date_time).as_str())
    );
    assert_eq!(
        dialect
            .format_time(date_time.time())
            .strip_suffix("::time"),
        Some(format::time(date_time.time()).as_str())
    );
}

#[test]
fn format_value_routes_through_suffixed_hooks() {
    let dialect = SnowflakeDialect::default();
    let value = SqlValue::TimestampWithTimeZone(String::from("2024-01-01T00:00:00Z"));
    assert_eq!(
        dialect.format_value(&value),
        "'2024-01-01T00:00:00Z'::timestamp_tz"
    );
    assert_eq!(dialect.format_value(&SqlValue::Text(String::from("o'k"))), "'o''k'");
}

#[test]
fn expression_binding_is_verbatim() {
    let dialect = SnowflakeDialect::default();
    let record = RecordDescriptor::new()
        .key(FieldDescriptor::new("id", FieldType::Integer))
        .field(
            FieldDescriptor::new("payload", FieldType::Json)
                .with_binding(Binding::expression("PARSE_JSON(?)")),
        );

    let statement = dialect.upsert_statement(&orders(), &record).unwrap();
    assert!(statement.sql.contains("PARSE_JSON(?) AS PAYLOAD"));
    assert_eq!(statement.parameters, vec!["id", "payload"]);
}

struct ShowParameters {
    calls: Cell<usize>,
    fail: bool,
}

impl ShowParameters {
    fn new(fail: bool) -> Self {
        Self {
            calls: Cell::new(0),
            fail,
        }
    }
}

impl QueryExecutor for ShowParameters {
    fn query(&self, sql: &str) -> Result<Vec<ResultRow>, QueryError> {
        self.calls.set(self.calls.get() + 1);
        assert_eq!(sql, "SHOW PARAMETERS LIKE 'TIMEZONE'");
        if self.fail {
            return Err("insufficient privileges".into());
        }
        Ok(vec![ResultRow::new()
            .with("key", Some("TIMEZONE"))
            .with("value", Some("America/Los_Angeles"))
            .with("default", Some("America/Los_Angeles"))])
    }
}

#[test]
fn timezone_discovered_once() {
    let dialect = SnowflakeDialect::default();
    let executor = ShowParameters::new(false);

    assert_eq!(
        dialect.discover_timezone(&executor).as_deref(),
        Some("America/Los_Angeles")
    );
    assert_eq!(
        dialect.discover_timezone(&executor).as_deref(),
        Some("America/Los_Angeles")
    );
    assert_eq!(executor.calls.get(), 1);
    assert_eq!(dialect.database_timezone(), "America/Los_Angeles");

    dialect.reset_timezone();
    let _ = dialect.discover_timezone(&executor);
    assert_eq!(executor.calls.get(), 2);
}

#[test]
fn timezone_failure_falls_back_to_default() {
    let dialect = SnowflakeDialect::new(DialectConfig::new().default_timezone("Europe/London"));
    let executor = ShowParameters::new(true);

    assert_eq!(dialect.discover_timezone(&executor), None);
    assert_eq!(dialect.database_timezone(), "Europe/London");
}
