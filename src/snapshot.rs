//! Schema snapshots.
//!
//! A [`SchemaSnapshot`] is the reflected structure of one database: an
//! ordered list of tables, each with an ordered list of columns. Only the
//! column name and its declared type string are kept.
//!
//! ```
//! use dbcc::snapshot::{SchemaSnapshot, Table};
//!
//! let mut snapshot = SchemaSnapshot::new();
//! snapshot.add_table(
//!     Table::new("orders")
//!         .in_schema("sales")
//!         .column("id", "INTEGER")
//!         .column("note", "VARCHAR(255)"),
//! );
//!
//! assert_eq!(snapshot.tables[0].qualified_name(), "sales.orders");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DbccError, DbccResult};

/// The reflected structure of a database at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    pub tables: Vec<Table>,
}

/// A table and its columns, in introspection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Namespace the table lives in. `None` for the default namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
    pub columns: Vec<Column>,
}

/// A column name with its declared type as rendered by introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub declared_type: String,
}

impl SchemaSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Find a table by qualified name. The first match wins.
    pub fn table(&self, qualified_name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.qualified_name() == qualified_name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of columns across all tables.
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    /// Decode a snapshot previously written with [`SchemaSnapshot::to_json`].
    pub fn from_json(json: &str) -> DbccResult<Self> {
        serde_json::from_str(json).map_err(|e| DbccError::Snapshot(e.to_string()))
    }

    pub fn to_json(&self) -> DbccResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DbccError::Snapshot(e.to_string()))
    }
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn column(mut self, name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        self.columns.push(Column::new(name, declared_type));
        self
    }

    /// `schema.name` when the table has a namespace, `name` otherwise.
    ///
    /// This is the key tables are matched on across snapshots.
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) if !schema.is_empty() => format!("{}.{}", schema, self.name),
            _ => self.name.clone(),
        }
    }
}

impl Column {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}
