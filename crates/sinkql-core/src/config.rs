//! Dialect configuration.
//!
//! The sink hands this to [`DialectProvider::instantiate`]. Where it is
//! loaded from is up to the caller; any serde format works.
//!
//! [`DialectProvider::instantiate`]: crate::registry::DialectProvider::instantiate

use serde::{Deserialize, Serialize};

/// Settings shared by every dialect instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    /// Timezone assumed when the database timezone cannot be discovered.
    pub default_timezone: String,
    /// Whether identifiers are emitted quoted and verbatim.
    pub quote_identifiers: bool,
    /// Dialect name that bypasses product auto-detection.
    pub dialect: Option<String>,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            default_timezone: String::from("UTC"),
            quote_identifiers: false,
            dialect: None,
        }
    }
}

impl DialectConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback timezone.
    #[must_use]
    pub fn default_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.default_timezone = timezone.into();
        self
    }

    /// Enables or disables identifier quoting.
    #[must_use]
    pub fn quote_identifiers(mut self, enabled: bool) -> Self {
        self.quote_identifiers = enabled;
        self
    }

    /// Forces a dialect by name.
    #[must_use]
    pub fn dialect(mut self, name: impl Into<String>) -> Self {
        self.dialect = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DialectConfig::default();
        assert_eq!(config.default_timezone, "UTC");
        assert!(!config.quote_identifiers);
        assert!(config.dialect.is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: DialectConfig =
            serde_json::from_str(r#"{"quote_identifiers": true, "dialect": "snowflake"}"#)
                .unwrap();
        assert!(config.quote_identifiers);
        assert_eq!(config.dialect.as_deref(), Some("snowflake"));
        assert_eq!(config.default_timezone, "UTC");
    }
}
