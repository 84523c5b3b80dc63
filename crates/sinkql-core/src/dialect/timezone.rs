//! Database timezone discovery.
//!
//! A dialect may declare a read-only query that reports the server's
//! configured timezone. The query runs once per dialect instance through an
//! injected [`QueryExecutor`]; any failure leaves the timezone unknown and
//! callers fall back to [`DialectConfig::default_timezone`].
//!
//! [`DialectConfig::default_timezone`]: crate::config::DialectConfig::default_timezone

use std::sync::{PoisonError, RwLock};

use tracing::{info, warn};

/// Error surfaced by an injected executor.
pub type QueryError = Box<dyn std::error::Error + Send + Sync>;

/// Runs read-only queries on behalf of the dialect layer.
pub trait QueryExecutor {
    /// Executes `sql` and returns its rows.
    fn query(&self, sql: &str) -> Result<Vec<ResultRow>, QueryError>;
}

/// One row of a query result, with columns addressed by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRow {
    columns: Vec<(String, Option<String>)>,
}

impl ResultRow {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column.
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, value: Option<&str>) -> Self {
        self.columns.push((label.into(), value.map(str::to_string)));
        self
    }

    /// Returns the value of the first column whose label matches,
    /// ignoring ASCII case.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(label))
            .and_then(|(_, value)| value.as_deref())
    }

    /// Returns the value at `index`.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&str> {
        self.columns.get(index).and_then(|(_, value)| value.as_deref())
    }
}

/// The timezone query of a dialect and how to read its result.
#[derive(Debug, Clone, Copy)]
pub struct TimezoneDiscovery {
    /// Read-only query returning the configured timezone.
    pub query: &'static str,
    /// Extracts the timezone from a result row.
    pub extract: fn(&ResultRow) -> Option<String>,
}

impl TimezoneDiscovery {
    /// Runs the query and extracts the timezone from its first row.
    ///
    /// Returns `None` when the query fails, returns no rows, or the
    /// extractor finds nothing.
    pub fn discover(&self, dialect: &str, executor: &dyn QueryExecutor) -> Option<String> {
        let rows = match executor.query(self.query) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(dialect, query = self.query, error = %e, "Timezone query failed");
                return None;
            }
        };
        let timezone = rows
            .first()
            .and_then(|row| (self.extract)(row))
            .filter(|tz| !tz.trim().is_empty());
        match &timezone {
            Some(tz) => info!(dialect, timezone = %tz, "Discovered database timezone"),
            None => warn!(
                dialect,
                query = self.query,
                rows = rows.len(),
                "Timezone query returned no usable value"
            ),
        }
        timezone
    }
}

#[derive(Debug, Clone, Default)]
enum CacheState {
    #[default]
    Undiscovered,
    Resolved(Option<String>),
}

/// Per-dialect cache of the discovered timezone.
#[derive(Debug, Default)]
pub struct TimezoneCache {
    state: RwLock<CacheState>,
}

impl TimezoneCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached outcome, or `None` if discovery has not run.
    ///
    /// `Some(None)` means discovery ran and the timezone is unknown.
    #[must_use]
    pub fn get(&self) -> Option<Option<String>> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            CacheState::Undiscovered => None,
            CacheState::Resolved(tz) => Some(tz.clone()),
        }
    }

    /// Returns the cached outcome, running `discover` first if needed.
    ///
    /// The write lock is held while `discover` runs so concurrent callers
    /// issue the query once.
    pub fn get_or_discover<F>(&self, discover: F) -> Option<String>
    where
        F: FnOnce() -> Option<String>,
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let CacheState::Resolved(tz) = &*state {
            return tz.clone();
        }
        let tz = discover();
        *state = CacheState::Resolved(tz.clone());
        tz
    }

    /// Forgets the cached outcome so the next lookup queries again.
    pub fn clear(&self) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = CacheState::Undiscovered;
    }
}
