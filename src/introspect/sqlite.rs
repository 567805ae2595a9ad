//! SQLite introspection via `sqlite_master` and `pragma_table_info`.

use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::render_sqlite_type;
use crate::error::{DbccError, DbccResult};
use crate::snapshot::{SchemaSnapshot, Table};

const TABLES_SQL: &str = "\
SELECT name FROM sqlite_master
WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
ORDER BY name";

const COLUMNS_SQL: &str = "SELECT name, type FROM pragma_table_info(?1) ORDER BY cid";

/// Reflect every user table. SQLite has no namespaces, so names are bare.
pub async fn snapshot(pool: &SqlitePool) -> DbccResult<SchemaSnapshot> {
    let names: Vec<String> = sqlx::query_scalar(TABLES_SQL)
        .fetch_all(pool)
        .await
        .map_err(DbccError::introspection)?;
    debug!("Found {} tables", names.len());

    let mut snapshot = SchemaSnapshot::new();
    for name in names {
        let rows = sqlx::query(COLUMNS_SQL)
            .bind(&name)
            .fetch_all(pool)
            .await
            .map_err(DbccError::introspection)?;

        let mut table = Table::new(name);
        for row in rows {
            let column: String = row.try_get("name").map_err(DbccError::introspection)?;
            let declared: String = row.try_get("type").map_err(DbccError::introspection)?;
            table = table.column(column, render_sqlite_type(&declared));
        }
        snapshot.add_table(table);
    }

    Ok(snapshot)
}
