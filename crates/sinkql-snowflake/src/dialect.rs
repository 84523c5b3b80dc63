//! Snowflake dialect implementation.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use sinkql_core::config::DialectConfig;
use sinkql_core::descriptor::TableDescriptor;
use sinkql_core::dialect::{
    Capabilities, DatabaseDialect, DialectContext, ResultRow, TimezoneDiscovery, UpsertSyntax,
};
use sinkql_core::format;

fn timezone_from_row(row: &ResultRow) -> Option<String> {
    row.get("value").map(str::to_string)
}

const CAPABILITIES: Capabilities = Capabilities {
    uppercase_unquoted_identifiers: true,
    max_varchar_key_length: 16_777_216,
    max_nvarchar_key_length: 16_777_216,
    max_varbinary_length: 8_388_608,
    timezone_discovery: Some(TimezoneDiscovery {
        query: "SHOW PARAMETERS LIKE 'TIMEZONE'",
        extract: timezone_from_row,
    }),
    upsert_syntax: UpsertSyntax::NativeMerge,
};

/// Snowflake dialect.
#[derive(Debug, Default)]
pub struct SnowflakeDialect {
    context: DialectContext,
}

impl SnowflakeDialect {
    /// Creates a new Snowflake dialect.
    #[must_use]
    pub fn new(config: DialectConfig) -> Self {
        Self {
            context: DialectContext::new(config),
        }
    }
}

impl DatabaseDialect for SnowflakeDialect {
    fn name(&self) -> &'static str {
        "snowflake"
    }

    fn capabilities(&self) -> &Capabilities {
        &CAPABILITIES
    }

    fn context(&self) -> &DialectContext {
        &self.context
    }

    fn merge_source_from(&self, table: &TableDescriptor) -> Option<String> {
        // the derived source row selects from the target itself
        Some(self.qualified_table_name(table.id()))
    }

    // String constants treat backslash as an escape character.
    fn format_string(&self, value: &str) -> String {
        format::backslash_escaped_string(value)
    }

    fn format_date(&self, value: NaiveDate) -> String {
        format!("{}::date", format::date(value))
    }

    fn format_time(&self, value: NaiveTime) -> String {
        format!("{}::time", format::time(value))
    }

    fn format_time_with_time_zone(&self, value: &str) -> String {
        format!("{}::time", format::time_with_time_zone(value))
    }

    fn format_date_time(&self, value: NaiveDateTime) -> String {
        format!("{}::timestamp", format::date_time(value))
    }

    fn format_date_time_with_nanos(&self, value: NaiveDateTime) -> String {
        self.format_date_time(value)
    }

    fn format_timestamp(&self, value: &DateTime<FixedOffset>) -> String {
        format!("{}::timestamp", format::timestamp(value))
    }

    fn format_timestamp_with_time_zone(&self, value: &str) -> String {
        format!("{}::timestamp_tz", format::timestamp_with_time_zone(value))
    }
}
