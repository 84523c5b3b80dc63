#![allow(dead_code)]

use sinkql_core::descriptor::{FieldDescriptor, FieldType, RecordDescriptor, TableDescriptor, TableId};
use sinkql_core::dialect::{
    Capabilities, DatabaseDialect, DialectContext, UpsertSyntax,
};
use sinkql_core::DialectConfig;

pub fn table(name: &str) -> TableDescriptor {
    TableDescriptor::new(TableId::new(name))
}

/// Builds a record from key and non-key field names, all placeholder-bound
/// text fields.
pub fn record(keys: &[&str], non_keys: &[&str]) -> RecordDescriptor {
    let record = keys.iter().fold(RecordDescriptor::new(), |r, name| {
        r.key(FieldDescriptor::new(*name, FieldType::Text))
    });
    non_keys.iter().fold(record, |r, name| {
        r.field(FieldDescriptor::new(*name, FieldType::Text))
    })
}

/// Returns the text between `open` and the next `)` after it.
pub fn between<'a>(sql: &'a str, open: &str) -> &'a str {
    let start = sql
        .find(open)
        .unwrap_or_else(|| panic!("'{open}' not found in: {sql}"))
        + open.len();
    let end = sql[start..]
        .find(')')
        .unwrap_or_else(|| panic!("unterminated '{open}' in: {sql}"))
        + start;
    &sql[start..end]
}

pub fn split(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).collect()
}

const TWO_STATEMENT: Capabilities = Capabilities {
    upsert_syntax: UpsertSyntax::UpdateThenInsert,
    ..Capabilities::DEFAULT
};

/// A dialect whose only difference from the defaults is the upsert family.
#[derive(Debug, Default)]
pub struct TwoStatementDialect {
    context: DialectContext,
}

impl TwoStatementDialect {
    pub fn new(config: DialectConfig) -> Self {
        Self {
            context: DialectContext::new(config),
        }
    }
}

impl DatabaseDialect for TwoStatementDialect {
    fn name(&self) -> &'static str {
        "two-statement"
    }

    fn capabilities(&self) -> &Capabilities {
        &TWO_STATEMENT
    }

    fn context(&self) -> &DialectContext {
        &self.context
    }
}
