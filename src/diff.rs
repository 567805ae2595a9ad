//! Schema differ.
//!
//! Compares an old (deployed) snapshot against a new (candidate) one and
//! classifies what changed:
//!
//! | Change                          | Severity |
//! |---------------------------------|----------|
//! | table missing from new          | error    |
//! | column missing from new table   | error    |
//! | column declared type changed    | warning  |
//!
//! Additions are never reported. Types are compared as plain strings, so
//! `INTEGER` → `BIGINT` is a warning just like any other change.
//!
//! The pass never stops early: one call reports every difference.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::snapshot::{Column, SchemaSnapshot, Table};

/// How bad a change is for consumers of the old schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Breaking: something that existed is gone.
    Error,
    /// Notable: a column changed its declared type.
    Warning,
}

/// A single discrepancy between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    MissingTable {
        table: String,
    },
    MissingColumn {
        table: String,
        column: String,
    },
    TypeChanged {
        old_table: String,
        new_table: String,
        column: String,
        old_type: String,
        new_type: String,
    },
}

impl Change {
    pub fn severity(&self) -> Severity {
        match self {
            Change::MissingTable { .. } | Change::MissingColumn { .. } => Severity::Error,
            Change::TypeChanged { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::MissingTable { table } => write!(f, "table {} not found in new DB", table),
            Change::MissingColumn { table, column } => {
                write!(f, "column {}.{} not found in new DB", table, column)
            }
            Change::TypeChanged {
                old_table,
                new_table,
                column,
                old_type,
                new_type,
            } => write!(
                f,
                "column {}.{} has type {}, while column {}.{} has type {}",
                old_table, column, old_type, new_table, column, new_type
            ),
        }
    }
}

/// The outcome of a diff: human-readable messages in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl DiffReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change under its severity. Nothing is merged or sorted.
    pub fn record(&mut self, change: &Change) {
        match change.severity() {
            Severity::Error => self.errors.push(change.to_string()),
            Severity::Warning => self.warnings.push(change.to_string()),
        }
    }

    /// True when at least one breaking change was found.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// True when nothing at all was found.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Compare two snapshots.
///
/// Every old table is looked up in `new` by qualified name. Tables that
/// are missing produce one error and nothing else; tables that match have
/// their columns compared by name.
///
/// # Example
///
/// ```
/// use dbcc::diff;
/// use dbcc::snapshot::{SchemaSnapshot, Table};
///
/// let mut old = SchemaSnapshot::new();
/// old.add_table(Table::new("t").column("age", "INTEGER"));
/// let mut new = SchemaSnapshot::new();
/// new.add_table(Table::new("t").column("age", "BIGINT"));
///
/// let report = diff(&old, &new);
/// assert!(report.errors.is_empty());
/// assert_eq!(
///     report.warnings,
///     vec!["column t.age has type INTEGER, while column t.age has type BIGINT"]
/// );
/// ```
pub fn diff(old: &SchemaSnapshot, new: &SchemaSnapshot) -> DiffReport {
    let mut report = DiffReport::new();
    for change in changes(old, new) {
        report.record(&change);
    }
    report
}

/// All changes between two snapshots, in old-snapshot order.
pub fn changes(old: &SchemaSnapshot, new: &SchemaSnapshot) -> Vec<Change> {
    let new_tables = index_tables(new);
    let mut out = Vec::new();

    for old_table in &old.tables {
        let name = old_table.qualified_name();
        match new_tables.get(name.as_str()) {
            Some((new_name, new_table)) => {
                compare_columns(&name, old_table, new_name, new_table, &mut out)
            }
            None => out.push(Change::MissingTable { table: name }),
        }
    }

    out
}

/// Qualified name -> table, keeping the first table for a repeated name.
fn index_tables(snapshot: &SchemaSnapshot) -> HashMap<String, (String, &Table)> {
    let mut index = HashMap::with_capacity(snapshot.tables.len());
    for table in &snapshot.tables {
        let name = table.qualified_name();
        index.entry(name.clone()).or_insert((name, table));
    }
    index
}

fn compare_columns(
    old_name: &str,
    old_table: &Table,
    new_name: &str,
    new_table: &Table,
    out: &mut Vec<Change>,
) {
    let mut new_columns: HashMap<&str, &Column> = HashMap::with_capacity(new_table.columns.len());
    for col in &new_table.columns {
        new_columns.entry(col.name.as_str()).or_insert(col);
    }

    for old_col in &old_table.columns {
        match new_columns.get(old_col.name.as_str()) {
            Some(new_col) if new_col.declared_type != old_col.declared_type => {
                out.push(Change::TypeChanged {
                    old_table: old_name.to_string(),
                    new_table: new_name.to_string(),
                    column: old_col.name.clone(),
                    old_type: old_col.declared_type.clone(),
                    new_type: new_col.declared_type.clone(),
                });
            }
            Some(_) => {}
            None => out.push(Change::MissingColumn {
                table: old_name.to_string(),
                column: old_col.name.clone(),
            }),
        }
    }
}
