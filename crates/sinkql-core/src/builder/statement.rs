//! Incremental SQL text assembly.

use std::fmt;

use crate::descriptor::FieldDescriptor;

/// A finished statement ready to hand to the execution layer.
///
/// `parameters` lists, in placeholder order, the name of the field whose
/// value must be bound to each placeholder in `sql`. Fields rendered as
/// inline literals do not appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStatement {
    /// The statement text.
    pub sql: String,
    /// Field names to bind, one per placeholder.
    pub parameters: Vec<String>,
}

impl GeneratedStatement {
    /// Returns the statement text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the number of placeholders the caller must bind.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Display for GeneratedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Appends statement fragments and tracks bound parameters.
#[derive(Debug, Default)]
pub struct StatementBuilder {
    sql: String,
    parameters: Vec<String>,
}

impl StatementBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw statement text.
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.sql.push_str(text);
        self
    }

    /// Appends each item through `f`, separated by `separator`.
    pub fn append_list<I, F>(&mut self, separator: &str, items: I, mut f: F) -> &mut Self
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.sql.push_str(separator);
            }
            f(&mut *self, item);
        }
        self
    }

    /// Appends the items of `first` followed by the items of `second`,
    /// all separated by `separator`.
    pub fn append_lists<I, J, F>(&mut self, separator: &str, first: I, second: J, f: F) -> &mut Self
    where
        I: IntoIterator,
        J: IntoIterator<Item = I::Item>,
        F: FnMut(&mut Self, I::Item),
    {
        self.append_list(separator, first.into_iter().chain(second), f)
    }

    /// Appends a rendered value binding for `field`, recording one
    /// parameter per placeholder the binding carries.
    pub fn bind(&mut self, field: &FieldDescriptor, rendered: &str) -> &mut Self {
        self.sql.push_str(rendered);
        for _ in 0..field.binding().placeholder_count() {
            self.parameters.push(field.name().to_string());
        }
        self
    }

    /// Returns whether nothing has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Finishes the statement.
    #[must_use]
    pub fn build(self) -> GeneratedStatement {
        GeneratedStatement {
            sql: self.sql,
            parameters: self.parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Binding, FieldDescriptor, FieldType};

    #[test]
    fn test_append_lists_keeps_order_and_separators() {
        let mut builder = StatementBuilder::new();
        builder.append("(");
        builder.append_lists(",", ["a", "b"], ["c"], |b, name| {
            b.append(name);
        });
        builder.append(")");
        assert_eq!(builder.build().sql, "(a,b,c)");
    }

    #[test]
    fn test_append_list_empty_emits_nothing() {
        let mut builder = StatementBuilder::new();
        builder.append_list(", ", Vec::<&str>::new(), |b, name| {
            b.append(name);
        });
        assert!(builder.is_empty());
    }

    #[test]
    fn test_bind_records_parameters() {
        let placeholder = FieldDescriptor::new("id", FieldType::Integer);
        let literal = FieldDescriptor::new("name", FieldType::Text)
            .with_binding(Binding::literal("x"));
        let expression = FieldDescriptor::new("span", FieldType::Text)
            .with_binding(Binding::expression("tsrange(?, ?)"));

        let mut builder = StatementBuilder::new();
        builder.bind(&placeholder, "?");
        builder.append(", ");
        builder.bind(&literal, "'x'");
        builder.append(", ");
        builder.bind(&expression, "tsrange(?, ?)");
        let statement = builder.build();

        assert_eq!(statement.sql, "?, 'x', tsrange(?, ?)");
        assert_eq!(statement.parameters, vec!["id", "span", "span"]);
        assert_eq!(statement.parameter_count(), 3);
    }
}
