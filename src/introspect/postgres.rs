//! PostgreSQL introspection via `information_schema`.

use sqlx::{PgPool, Row};
use tracing::debug;

use super::types::{PgColumnType, render_pg_type};
use crate::error::{DbccError, DbccResult};
use crate::snapshot::{Column, SchemaSnapshot, Table};

// information_schema uses domain types sqlx cannot decode directly, so
// everything is cast to a plain type. Driven from `tables` so a table
// without columns still shows up, as one row with NULL column fields.
const COLUMNS_SQL: &str = "\
SELECT t.table_schema::text AS table_schema,
       t.table_name::text AS table_name,
       c.column_name::text AS column_name,
       c.data_type::text AS data_type,
       c.udt_name::text AS udt_name,
       c.character_maximum_length::int4 AS character_maximum_length,
       c.numeric_precision::int4 AS numeric_precision,
       c.numeric_scale::int4 AS numeric_scale,
       c.datetime_precision::int4 AS datetime_precision,
       c.interval_type::text AS interval_type
FROM information_schema.tables t
LEFT JOIN information_schema.columns c
  ON c.table_schema = t.table_schema AND c.table_name = t.table_name
WHERE t.table_type = 'BASE TABLE'
  AND t.table_schema = ANY($1)
ORDER BY t.table_schema, t.table_name, c.ordinal_position";

/// Reflect the connection's current schema plus `extra_schemas`.
///
/// Tables in the current schema keep bare names; tables in the extra
/// schemas are qualified with their schema name.
pub async fn snapshot(pool: &PgPool, extra_schemas: &[String]) -> DbccResult<SchemaSnapshot> {
    let default_schema: String = sqlx::query_scalar("SELECT current_schema()::text")
        .fetch_one(pool)
        .await
        .map_err(DbccError::introspection)?;
    debug!("Default schema is {}", default_schema);

    let mut schemas = vec![default_schema.clone()];
    for schema in extra_schemas {
        if !schemas.contains(schema) {
            schemas.push(schema.clone());
        }
    }

    let rows = sqlx::query(COLUMNS_SQL)
        .bind(&schemas)
        .fetch_all(pool)
        .await
        .map_err(DbccError::introspection)?;
    debug!("Fetched {} column rows", rows.len());

    let mut snapshot = SchemaSnapshot::new();
    for row in rows {
        let table_schema: String = row.try_get("table_schema").map_err(DbccError::introspection)?;
        let table_name: String = row.try_get("table_name").map_err(DbccError::introspection)?;
        let schema = (table_schema != default_schema).then_some(table_schema);

        // NULL column for a table with no columns
        let column_name: Option<String> =
            row.try_get("column_name").map_err(DbccError::introspection)?;
        let Some(column_name) = column_name else {
            push_column(&mut snapshot, schema, table_name, None);
            continue;
        };

        let data_type: String = row.try_get("data_type").map_err(DbccError::introspection)?;
        let udt_name: String = row.try_get("udt_name").map_err(DbccError::introspection)?;
        let interval_type: Option<String> =
            row.try_get("interval_type").map_err(DbccError::introspection)?;

        let declared_type = render_pg_type(&PgColumnType {
            data_type: &data_type,
            udt_name: &udt_name,
            character_maximum_length: row
                .try_get("character_maximum_length")
                .map_err(DbccError::introspection)?,
            numeric_precision: row
                .try_get("numeric_precision")
                .map_err(DbccError::introspection)?,
            numeric_scale: row.try_get("numeric_scale").map_err(DbccError::introspection)?,
            datetime_precision: row
                .try_get("datetime_precision")
                .map_err(DbccError::introspection)?,
            interval_type: interval_type.as_deref(),
        });

        push_column(
            &mut snapshot,
            schema,
            table_name,
            Some(Column::new(column_name, declared_type)),
        );
    }

    Ok(snapshot)
}

/// Rows arrive ordered by table, so a new table starts whenever the
/// (schema, name) pair changes. `None` adds the table with no column.
fn push_column(
    snapshot: &mut SchemaSnapshot,
    schema: Option<String>,
    name: String,
    column: Option<Column>,
) {
    match snapshot.tables.last_mut() {
        Some(last) if last.schema == schema && last.name == name => {
            last.columns.extend(column);
        }
        _ => {
            let mut table = Table::new(name);
            table.schema = schema;
            table.columns.extend(column);
            snapshot.add_table(table);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_column_groups_rows() {
        let mut snapshot = SchemaSnapshot::new();
        push_column(&mut snapshot, None, "a".into(), Some(Column::new("id", "INTEGER")));
        push_column(&mut snapshot, None, "a".into(), Some(Column::new("name", "TEXT")));
        push_column(
            &mut snapshot,
            Some("sales".into()),
            "a".into(),
            Some(Column::new("id", "BIGINT")),
        );
        push_column(
            &mut snapshot,
            Some("sales".into()),
            "b".into(),
            Some(Column::new("id", "BIGINT")),
        );

        let names: Vec<String> = snapshot.tables.iter().map(|t| t.qualified_name()).collect();
        assert_eq!(names, vec!["a", "sales.a", "sales.b"]);
        assert_eq!(snapshot.tables[0].columns.len(), 2);
    }

    #[test]
    fn test_table_without_columns_is_kept() {
        let mut snapshot = SchemaSnapshot::new();
        push_column(&mut snapshot, None, "empty".into(), None);
        push_column(&mut snapshot, None, "users".into(), Some(Column::new("id", "INTEGER")));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.tables[0].name, "empty");
        assert!(snapshot.tables[0].columns.is_empty());

        // Dropping the empty table must still be reported
        let mut new = SchemaSnapshot::new();
        new.add_table(Table::new("users").column("id", "INTEGER"));
        let report = crate::diff::diff(&snapshot, &new);
        assert_eq!(report.errors, vec!["table empty not found in new DB"]);
    }
}
