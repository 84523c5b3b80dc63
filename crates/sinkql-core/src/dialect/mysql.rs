//! MySQL dialect.

use super::{Capabilities, DatabaseDialect, DialectContext, ResultRow, TimezoneDiscovery, UpsertSyntax};
use crate::config::DialectConfig;
use crate::format;

fn timezone_from_row(row: &ResultRow) -> Option<String> {
    row.get_index(0).map(str::to_string)
}

const CAPABILITIES: Capabilities = Capabilities {
    max_varchar_key_length: 255,
    max_nvarchar_key_length: 255,
    max_varbinary_length: 65_535,
    timezone_discovery: Some(TimezoneDiscovery {
        query: "SELECT @@session.time_zone",
        extract: timezone_from_row,
    }),
    upsert_syntax: UpsertSyntax::InsertOnDuplicateKey,
    ..Capabilities::DEFAULT
};

/// MySQL dialect: backtick quoting and `ON DUPLICATE KEY UPDATE` upserts.
#[derive(Debug, Default)]
pub struct MySqlDialect {
    context: DialectContext,
}

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub fn new(config: DialectConfig) -> Self {
        Self {
            context: DialectContext::new(config),
        }
    }
}

impl DatabaseDialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn capabilities(&self) -> &Capabilities {
        &CAPABILITIES
    }

    fn context(&self) -> &DialectContext {
        &self.context
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    // Backslash escapes unless sql_mode has NO_BACKSLASH_ESCAPES.
    fn format_string(&self, value: &str) -> String {
        format::backslash_escaped_string(value)
    }
}
