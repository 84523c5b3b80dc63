//! Generic SQL dialect.

use super::{Capabilities, DatabaseDialect, DialectContext};
use crate::config::DialectConfig;

/// A dialect using every default: ANSI quoting, `MERGE` upserts, no
/// timezone discovery.
#[derive(Debug, Default)]
pub struct GenericDialect {
    context: DialectContext,
}

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub fn new(config: DialectConfig) -> Self {
        Self {
            context: DialectContext::new(config),
        }
    }
}

impl DatabaseDialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn capabilities(&self) -> &Capabilities {
        &Capabilities::DEFAULT
    }

    fn context(&self) -> &DialectContext {
        &self.context
    }
}
