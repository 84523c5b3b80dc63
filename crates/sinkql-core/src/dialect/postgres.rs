//! PostgreSQL dialect.

use super::{Capabilities, DatabaseDialect, DialectContext, ResultRow, TimezoneDiscovery, UpsertSyntax};
use crate::config::DialectConfig;
use crate::format;

fn timezone_from_row(row: &ResultRow) -> Option<String> {
    row.get("TimeZone").map(str::to_string)
}

const CAPABILITIES: Capabilities = Capabilities {
    max_varchar_key_length: 10_485_760,
    max_nvarchar_key_length: 10_485_760,
    max_varbinary_length: 1_073_741_823,
    timezone_discovery: Some(TimezoneDiscovery {
        query: "SHOW TIMEZONE",
        extract: timezone_from_row,
    }),
    upsert_syntax: UpsertSyntax::InsertOnConflict,
    ..Capabilities::DEFAULT
};

/// PostgreSQL dialect: `INSERT ... ON CONFLICT` upserts and `bytea`
/// escape-format binary literals.
#[derive(Debug, Default)]
pub struct PostgresDialect {
    context: DialectContext,
}

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub fn new(config: DialectConfig) -> Self {
        Self {
            context: DialectContext::new(config),
        }
    }
}

impl DatabaseDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn capabilities(&self) -> &Capabilities {
        &CAPABILITIES
    }

    fn context(&self) -> &DialectContext {
        &self.context
    }

    fn format_binary(&self, value: &[u8]) -> String {
        format!("'\\x{}'", format::hex(value))
    }
}
