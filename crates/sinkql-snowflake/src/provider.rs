//! Registry entry for the Snowflake dialect.

use std::sync::Arc;

use sinkql_core::config::DialectConfig;
use sinkql_core::dialect::DatabaseDialect;
use sinkql_core::registry::{DatabaseProduct, DialectProvider, DialectRegistry};
use tracing::debug;

use crate::dialect::SnowflakeDialect;

/// Product name Snowflake reports when it has a dedicated identity.
pub const PRODUCT_NAME: &str = "Snowflake";

/// Generic product signature the Snowflake driver stack is detected under.
///
/// There is no dedicated driver-reported identity to match on reliably, so
/// this placeholder is also claimed. Prefer selecting the dialect by name
/// through [`DialectConfig::dialect`].
pub const PLACEHOLDER_PRODUCT_NAME: &str = "Apache Derby";

/// Provider for [`SnowflakeDialect`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SnowflakeProvider;

impl DialectProvider for SnowflakeProvider {
    fn name(&self) -> &'static str {
        "snowflake"
    }

    fn supports(&self, product: &DatabaseProduct) -> bool {
        product.is(PRODUCT_NAME) || product.is(PLACEHOLDER_PRODUCT_NAME)
    }

    fn instantiate(&self, config: &DialectConfig) -> Arc<dyn DatabaseDialect> {
        debug!(quote_identifiers = config.quote_identifiers, "Instantiating Snowflake dialect");
        Arc::new(SnowflakeDialect::new(config.clone()))
    }
}

/// Registers [`SnowflakeProvider`] ahead of the registry's generic
/// catch-all.
#[must_use]
pub fn with_snowflake(registry: DialectRegistry) -> DialectRegistry {
    registry.register_before_generic(SnowflakeProvider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_dedicated_and_placeholder_identity() {
        let provider = SnowflakeProvider;
        assert!(provider.supports(&DatabaseProduct::new("Snowflake")));
        assert!(provider.supports(&DatabaseProduct::new("apache derby")));
        assert!(!provider.supports(&DatabaseProduct::new("PostgreSQL")));
    }

    #[test]
    fn test_with_snowflake_precedes_generic() {
        let registry = with_snowflake(DialectRegistry::builtin());
        assert_eq!(
            registry.names(),
            vec!["postgresql", "mysql", "snowflake", "generic"]
        );

        let dialect = registry
            .resolve(&DatabaseProduct::new("Snowflake"), &DialectConfig::default())
            .unwrap();
        assert_eq!(dialect.name(), "snowflake");
    }

    #[test]
    fn test_explicit_name_selects_snowflake() {
        let registry = with_snowflake(DialectRegistry::builtin());
        let config = DialectConfig::new().dialect("snowflake");
        let dialect = registry
            .resolve_with_config(&DatabaseProduct::new("Unknown JDBC"), &config)
            .unwrap();
        assert_eq!(dialect.name(), "snowflake");
    }
}
