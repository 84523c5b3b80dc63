//! Tests for the default MERGE assembly: clause membership, list
//! ordering, key-only records and determinism.

mod common;
use common::*;

use sinkql_core::dialect::GenericDialect;
use sinkql_core::DatabaseDialect;

const SHAPES: &[(&[&str], &[&str])] = &[
    (&["id"], &["status"]),
    (&["id"], &["status", "total", "note"]),
    (&["tenant", "id"], &["status"]),
    (&["a", "b", "c"], &["x", "y"]),
    (&["id"], &[]),
    (&["tenant", "id"], &[]),
];

#[test]
fn matched_update_references_exactly_non_keys() {
    let dialect = GenericDialect::default();
    for (keys, non_keys) in SHAPES {
        let sql = dialect
            .upsert_statement(&table("t"), &record(keys, non_keys))
            .unwrap()
            .sql;
        if non_keys.is_empty() {
            assert!(!sql.contains("WHEN MATCHED"), "{sql}");
            continue;
        }
        let set = sql
            .split(" WHEN MATCHED THEN UPDATE SET ")
            .nth(1)
            .and_then(|rest| rest.split(" WHEN NOT MATCHED").next())
            .unwrap();
        let expected: Vec<String> = non_keys
            .iter()
            .map(|c| format!("t.{c}=INCOMING.{c}"))
            .collect();
        assert_eq!(split(set), expected, "{sql}");
    }
}

#[test]
fn insert_lists_cover_all_fields_in_matching_order() {
    let dialect = GenericDialect::default();
    for (keys, non_keys) in SHAPES {
        let sql = dialect
            .upsert_statement(&table("t"), &record(keys, non_keys))
            .unwrap()
            .sql;
        let columns = split(between(&sql, "THEN INSERT ("));
        let values = split(between(&sql, ") VALUES ("));

        let expected: Vec<&str> = non_keys.iter().chain(keys.iter()).copied().collect();
        assert_eq!(columns, expected, "{sql}");
        let stripped: Vec<&str> = values
            .iter()
            .map(|v| v.strip_prefix("INCOMING.").unwrap())
            .collect();
        assert_eq!(stripped, columns, "{sql}");
    }
}

#[test]
fn match_predicate_joins_keys_with_and() {
    let dialect = GenericDialect::default();
    let sql = dialect
        .upsert_statement(&table("t"), &record(&["tenant", "id"], &["v"]))
        .unwrap()
        .sql;
    assert!(sql.contains(" ON (t.tenant=INCOMING.tenant AND t.id=INCOMING.id)"));
}

#[test]
fn projection_lists_keys_before_non_keys() {
    let dialect = GenericDialect::default();
    let statement = dialect
        .upsert_statement(&table("t"), &record(&["id"], &["a", "b"]))
        .unwrap();
    assert!(statement
        .sql
        .starts_with("MERGE INTO t USING (SELECT ? AS id, ? AS a, ? AS b) AS INCOMING"));
    assert_eq!(statement.parameters, vec!["id", "a", "b"]);
}

#[test]
fn generation_is_byte_identical_across_calls() {
    let dialect = GenericDialect::default();
    for (keys, non_keys) in SHAPES {
        let r = record(keys, non_keys);
        let first = dialect.upsert_statement(&table("t"), &r).unwrap();
        let second = dialect.upsert_statement(&table("t"), &r.clone()).unwrap();
        assert_eq!(first.sql, second.sql);
        assert_eq!(first.parameters, second.parameters);
    }
}

#[test]
fn concurrent_generation_shares_one_dialect() {
    let dialect = std::sync::Arc::new(GenericDialect::default());
    let expected = dialect
        .upsert_statement(&table("t"), &record(&["id"], &["v"]))
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let dialect = std::sync::Arc::clone(&dialect);
            std::thread::spawn(move || {
                dialect
                    .upsert_statement(&table("t"), &record(&["id"], &["v"]))
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
