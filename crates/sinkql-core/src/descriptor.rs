//! Table and record descriptors consumed by statement generation.
//!
//! Both descriptors are produced by collaborators outside this crate: the
//! table descriptor by schema resolution, the record descriptor by the
//! change-event decoder. Generation only reads them.

use std::fmt;

use crate::builder::value::{SqlValue, ToSqlValue};

/// Identifies a destination table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableId {
    /// Catalog (database) qualifier.
    pub catalog: Option<String>,
    /// Schema qualifier.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
}

impl TableId {
    /// Creates an unqualified table id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: None,
            name: name.into(),
        }
    }

    /// Sets the schema qualifier.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Sets the catalog qualifier.
    #[must_use]
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Returns the non-empty name parts, outermost first.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        [self.catalog.as_deref(), self.schema.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .chain(std::iter::once(self.name.as_str()))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.parts().collect();
        f.write_str(&parts.join("."))
    }
}

/// A resolved destination table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    id: TableId,
}

impl TableDescriptor {
    /// Creates a descriptor for the given table.
    #[must_use]
    pub const fn new(id: TableId) -> Self {
        Self { id }
    }

    /// Returns the table id.
    #[must_use]
    pub const fn id(&self) -> &TableId {
        &self.id
    }
}

/// Key-column storage classes that carry a vendor length ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStorage {
    /// Single-byte character data.
    Varchar,
    /// National (multi-byte) character data.
    NVarchar,
    /// Binary data.
    Varbinary,
}

/// Logical type of an incoming field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Boolean.
    Boolean,
    /// Integer of any width.
    Integer,
    /// Floating point.
    Float,
    /// Exact decimal.
    Decimal,
    /// Character data.
    Text,
    /// National character data.
    NationalText,
    /// Binary data.
    Binary,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Time of day with zone.
    TimeWithTimeZone,
    /// Local date-time.
    DateTime,
    /// Instant with offset.
    Timestamp,
    /// Zoned timestamp.
    TimestampWithTimeZone,
    /// JSON document.
    Json,
}

impl FieldType {
    /// Returns the storage class used when this type forms part of a key.
    #[must_use]
    pub const fn key_storage(self) -> Option<KeyStorage> {
        match self {
            Self::Text | Self::Json => Some(KeyStorage::Varchar),
            Self::NationalText => Some(KeyStorage::NVarchar),
            Self::Binary => Some(KeyStorage::Varbinary),
            _ => None,
        }
    }
}

/// How a field's value reaches the statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// A parameter placeholder bound by the execution layer.
    Placeholder,
    /// A literal rendered by the dialect.
    Literal(SqlValue),
    /// An expression emitted verbatim, binding `parameters` placeholders.
    Expression {
        /// The expression text.
        sql: String,
        /// Number of placeholders in `sql`.
        parameters: usize,
    },
}

impl Binding {
    /// Creates a literal binding from any convertible value.
    pub fn literal(value: impl ToSqlValue) -> Self {
        Self::Literal(value.to_sql_value())
    }

    /// Creates an expression binding, counting each `?` outside quoted
    /// literals and quoted identifiers as a placeholder.
    ///
    /// Expressions that use `?` as an operator, such as PostgreSQL's jsonb
    /// key test, must state their count through
    /// [`expression_with_parameters`](Self::expression_with_parameters).
    pub fn expression(sql: impl Into<String>) -> Self {
        let sql = sql.into();
        let parameters = count_placeholders(&sql);
        Self::Expression { sql, parameters }
    }

    /// Creates an expression binding with an explicit placeholder count.
    pub fn expression_with_parameters(sql: impl Into<String>, parameters: usize) -> Self {
        Self::Expression {
            sql: sql.into(),
            parameters,
        }
    }

    /// Returns how many parameters the caller binds for this field.
    #[must_use]
    pub const fn placeholder_count(&self) -> usize {
        match self {
            Self::Placeholder => 1,
            Self::Literal(_) => 0,
            Self::Expression { parameters, .. } => *parameters,
        }
    }
}

fn count_placeholders(sql: &str) -> usize {
    let mut quote = None;
    let mut count = 0;
    for c in sql.chars() {
        match (quote, c) {
            // a doubled quote closes and reopens, leaving the state unchanged
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"' | '`') => quote = Some(c),
            (None, '?') => count += 1,
            (None, _) => {}
        }
    }
    count
}

/// One field of an incoming change record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    column: Option<String>,
    field_type: FieldType,
    binding: Binding,
}

impl FieldDescriptor {
    /// Creates a field bound through a placeholder.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            column: None,
            field_type,
            binding: Binding::Placeholder,
        }
    }

    /// Maps the field onto a differently named column.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Sets the binding strategy.
    #[must_use]
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }

    /// Binds the field as an inline literal.
    #[must_use]
    pub fn with_value(self, value: impl ToSqlValue) -> Self {
        self.with_binding(Binding::literal(value))
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unquoted target column name.
    #[must_use]
    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }

    /// Returns the logical field type.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the binding strategy.
    #[must_use]
    pub const fn binding(&self) -> &Binding {
        &self.binding
    }
}

/// The normalized shape of one change event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordDescriptor {
    key_fields: Vec<FieldDescriptor>,
    non_key_fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key field.
    #[must_use]
    pub fn key(mut self, field: FieldDescriptor) -> Self {
        self.key_fields.push(field);
        self
    }

    /// Appends a non-key field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.non_key_fields.push(field);
        self
    }

    /// Returns the key fields in record order.
    #[must_use]
    pub fn key_fields(&self) -> &[FieldDescriptor] {
        &self.key_fields
    }

    /// Returns the non-key fields in record order.
    #[must_use]
    pub fn non_key_fields(&self) -> &[FieldDescriptor] {
        &self.non_key_fields
    }

    /// Returns the key field names in record order.
    pub fn key_field_names(&self) -> impl Iterator<Item = &str> {
        self.key_fields.iter().map(FieldDescriptor::name)
    }

    /// Returns the non-key field names in record order.
    pub fn non_key_field_names(&self) -> impl Iterator<Item = &str> {
        self.non_key_fields.iter().map(FieldDescriptor::name)
    }

    /// Returns key fields followed by non-key fields.
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.key_fields.iter().chain(&self.non_key_fields)
    }
}
