//! Resolution of a database product to its dialect.
//!
//! The registry is an ordered list the caller builds at startup. Lookup is
//! first-match in that order, so specific providers go before catch-alls.
//! Auto-detection can always be bypassed by naming a dialect explicitly.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::DialectConfig;
use crate::dialect::{DatabaseDialect, GenericDialect, MySqlDialect, PostgresDialect};
use crate::error::{Error, Result};

/// Identity of a database product as reported by its driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseProduct {
    /// Product name, e.g. `PostgreSQL`.
    pub name: String,
    /// Product version, if reported.
    pub version: Option<String>,
}

impl DatabaseProduct {
    /// Creates a product identity without a version.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// Sets the product version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Returns whether the product name matches `name`, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for DatabaseProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} {version}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Registration entry for a vendor dialect.
pub trait DialectProvider: Send + Sync {
    /// Returns the dialect name used for explicit selection.
    fn name(&self) -> &'static str;

    /// Returns whether this provider handles `product`.
    fn supports(&self, product: &DatabaseProduct) -> bool;

    /// Creates a dialect instance.
    fn instantiate(&self, config: &DialectConfig) -> Arc<dyn DatabaseDialect>;
}

/// Provider for [`PostgresDialect`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresProvider;

impl DialectProvider for PostgresProvider {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn supports(&self, product: &DatabaseProduct) -> bool {
        product.is("PostgreSQL")
    }

    fn instantiate(&self, config: &DialectConfig) -> Arc<dyn DatabaseDialect> {
        Arc::new(PostgresDialect::new(config.clone()))
    }
}

/// Provider for [`MySqlDialect`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlProvider;

impl DialectProvider for MySqlProvider {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn supports(&self, product: &DatabaseProduct) -> bool {
        product.is("MySQL") || product.is("MariaDB")
    }

    fn instantiate(&self, config: &DialectConfig) -> Arc<dyn DatabaseDialect> {
        Arc::new(MySqlDialect::new(config.clone()))
    }
}

/// Provider for [`GenericDialect`]; supports every product.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericProvider;

impl DialectProvider for GenericProvider {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn supports(&self, _product: &DatabaseProduct) -> bool {
        true
    }

    fn instantiate(&self, config: &DialectConfig) -> Arc<dyn DatabaseDialect> {
        Arc::new(GenericDialect::new(config.clone()))
    }
}

/// An ordered list of dialect providers.
#[derive(Default)]
pub struct DialectRegistry {
    providers: Vec<Box<dyn DialectProvider>>,
}

impl fmt::Debug for DialectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|p| p.name()))
            .finish()
    }
}

impl DialectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with PostgreSQL, MySQL and the generic catch-all,
    /// in that order.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .register(PostgresProvider)
            .register(MySqlProvider)
            .register(GenericProvider)
    }

    /// Appends a provider after all registered ones.
    #[must_use]
    pub fn register(mut self, provider: impl DialectProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Inserts a provider at `index`, clamped to the list length.
    #[must_use]
    pub fn register_at(mut self, index: usize, provider: impl DialectProvider + 'static) -> Self {
        let index = index.min(self.providers.len());
        self.providers.insert(index, Box::new(provider));
        self
    }

    /// Inserts a provider ahead of the first catch-all, or appends it when
    /// there is none.
    #[must_use]
    pub fn register_before_generic(self, provider: impl DialectProvider + 'static) -> Self {
        let index = self
            .providers
            .iter()
            .position(|p| p.name() == GenericProvider.name())
            .unwrap_or(self.providers.len());
        self.register_at(index, provider)
    }

    /// Returns the registered provider names in lookup order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolves the first provider supporting `product`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DialectNotFound`] when no provider matches.
    pub fn resolve(
        &self,
        product: &DatabaseProduct,
        config: &DialectConfig,
    ) -> Result<Arc<dyn DatabaseDialect>> {
        let provider = self
            .providers
            .iter()
            .find(|p| p.supports(product))
            .ok_or_else(|| Error::DialectNotFound(product.to_string()))?;
        debug!(product = %product, dialect = provider.name(), "Resolved dialect");
        Ok(provider.instantiate(config))
    }

    /// Resolves a provider by its name, bypassing detection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDialect`] when no provider has that name.
    pub fn resolve_named(&self, name: &str, config: &DialectConfig) -> Result<Arc<dyn DatabaseDialect>> {
        let provider = self
            .providers
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownDialect(name.to_string()))?;
        debug!(dialect = provider.name(), "Resolved dialect by name");
        Ok(provider.instantiate(config))
    }

    /// Resolves `config.dialect` when set, otherwise detects from `product`.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve) and [`resolve_named`](Self::resolve_named).
    pub fn resolve_with_config(
        &self,
        product: &DatabaseProduct,
        config: &DialectConfig,
    ) -> Result<Arc<dyn DatabaseDialect>> {
        match config.dialect.as_deref() {
            Some(name) => self.resolve_named(name, config),
            None => self.resolve(product, config),
        }
    }
}
