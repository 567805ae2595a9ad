//! Declared-type rendering.
//!
//! Column types are compared as strings, so every provider must render
//! them the same way for the same type: upper case, length/precision in
//! parentheses, SQL standard names where they exist.

/// Type columns of one `information_schema.columns` row.
#[derive(Debug, Clone, Default)]
pub struct PgColumnType<'a> {
    pub data_type: &'a str,
    pub udt_name: &'a str,
    pub character_maximum_length: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    /// Fractional seconds digits for time, timestamp and interval types.
    pub datetime_precision: Option<i32>,
    /// Field restriction of an interval, e.g. `DAY TO SECOND`.
    pub interval_type: Option<&'a str>,
}

/// PostgreSQL's precision when none is declared.
const DEFAULT_DATETIME_PRECISION: i32 = 6;

/// Render a PostgreSQL column type.
///
/// ```
/// use dbcc::introspect::types::{render_pg_type, PgColumnType};
///
/// let ty = PgColumnType {
///     data_type: "character varying",
///     udt_name: "varchar",
///     character_maximum_length: Some(255),
///     ..Default::default()
/// };
/// assert_eq!(render_pg_type(&ty), "VARCHAR(255)");
/// ```
pub fn render_pg_type(ty: &PgColumnType<'_>) -> String {
    match ty.data_type {
        "character varying" => with_length("VARCHAR", ty.character_maximum_length),
        "character" => with_length("CHAR", ty.character_maximum_length),
        "bit varying" => with_length("VARBIT", ty.character_maximum_length),
        "bit" => with_length("BIT", ty.character_maximum_length),
        "integer" => "INTEGER".to_string(),
        "bigint" => "BIGINT".to_string(),
        "smallint" => "SMALLINT".to_string(),
        "real" => "REAL".to_string(),
        "double precision" => "DOUBLE PRECISION".to_string(),
        // Precision is only reported for constrained numerics
        "numeric" => match (ty.numeric_precision, ty.numeric_scale) {
            (Some(p), Some(s)) => format!("NUMERIC({}, {})", p, s),
            (Some(p), None) => format!("NUMERIC({})", p),
            _ => "NUMERIC".to_string(),
        },
        "timestamp without time zone" => with_precision("TIMESTAMP", "", ty.datetime_precision),
        "timestamp with time zone" => {
            with_precision("TIMESTAMP", " WITH TIME ZONE", ty.datetime_precision)
        }
        "time without time zone" => with_precision("TIME", "", ty.datetime_precision),
        "time with time zone" => with_precision("TIME", " WITH TIME ZONE", ty.datetime_precision),
        "interval" => {
            let name = match ty.interval_type {
                Some(fields) if !fields.is_empty() => format!("INTERVAL {}", fields.to_uppercase()),
                _ => "INTERVAL".to_string(),
            };
            with_precision(&name, "", ty.datetime_precision)
        }
        "ARRAY" => format!("{}[]", array_element(ty.udt_name)),
        "USER-DEFINED" => ty.udt_name.to_uppercase(),
        other => other.to_uppercase(),
    }
}

/// Render a SQLite declared type. SQLite keeps the text as written.
pub fn render_sqlite_type(declared: &str) -> String {
    declared.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase()
}

fn with_length(name: &str, length: Option<i32>) -> String {
    match length {
        Some(n) => format!("{}({})", name, n),
        None => name.to_string(),
    }
}

/// `TIMESTAMP(3) WITH TIME ZONE`; the precision is left out when it is the default.
fn with_precision(name: &str, suffix: &str, precision: Option<i32>) -> String {
    match precision {
        Some(p) if p != DEFAULT_DATETIME_PRECISION => format!("{}({}){}", name, p, suffix),
        _ => format!("{}{}", name, suffix),
    }
}

/// Array udt names are the element udt name prefixed with `_`.
fn array_element(udt_name: &str) -> String {
    let element = udt_name.strip_prefix('_').unwrap_or(udt_name);
    match element {
        "int2" => "SMALLINT".to_string(),
        "int4" => "INTEGER".to_string(),
        "int8" => "BIGINT".to_string(),
        "float4" => "REAL".to_string(),
        "float8" => "DOUBLE PRECISION".to_string(),
        "bool" => "BOOLEAN".to_string(),
        "varchar" => "VARCHAR".to_string(),
        "bpchar" => "CHAR".to_string(),
        "timestamp" => "TIMESTAMP".to_string(),
        "timestamptz" => "TIMESTAMP WITH TIME ZONE".to_string(),
        other => other.to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pg(data_type: &'static str, udt_name: &'static str) -> PgColumnType<'static> {
        PgColumnType {
            data_type,
            udt_name,
            ..Default::default()
        }
    }

    #[test]
    fn test_scalar_types() {
        assert_eq!(render_pg_type(&pg("integer", "int4")), "INTEGER");
        assert_eq!(render_pg_type(&pg("bigint", "int8")), "BIGINT");
        assert_eq!(render_pg_type(&pg("text", "text")), "TEXT");
        assert_eq!(render_pg_type(&pg("boolean", "bool")), "BOOLEAN");
        assert_eq!(render_pg_type(&pg("uuid", "uuid")), "UUID");
        assert_eq!(render_pg_type(&pg("jsonb", "jsonb")), "JSONB");
        assert_eq!(render_pg_type(&pg("double precision", "float8")), "DOUBLE PRECISION");
    }

    #[test]
    fn test_lengths() {
        let mut ty = pg("character varying", "varchar");
        assert_eq!(render_pg_type(&ty), "VARCHAR");
        ty.character_maximum_length = Some(64);
        assert_eq!(render_pg_type(&ty), "VARCHAR(64)");

        let mut ty = pg("character", "bpchar");
        ty.character_maximum_length = Some(2);
        assert_eq!(render_pg_type(&ty), "CHAR(2)");
    }

    #[test]
    fn test_numeric_precision() {
        let mut ty = pg("numeric", "numeric");
        assert_eq!(render_pg_type(&ty), "NUMERIC");
        ty.numeric_precision = Some(10);
        ty.numeric_scale = Some(2);
        assert_eq!(render_pg_type(&ty), "NUMERIC(10, 2)");
    }

    #[test]
    fn test_temporal_types() {
        assert_eq!(render_pg_type(&pg("timestamp without time zone", "timestamp")), "TIMESTAMP");
        assert_eq!(
            render_pg_type(&pg("timestamp with time zone", "timestamptz")),
            "TIMESTAMP WITH TIME ZONE"
        );
        assert_eq!(render_pg_type(&pg("date", "date")), "DATE");
    }

    #[test]
    fn test_datetime_precision() {
        let mut ty = pg("timestamp without time zone", "timestamp");
        ty.datetime_precision = Some(6);
        assert_eq!(render_pg_type(&ty), "TIMESTAMP");
        ty.datetime_precision = Some(3);
        assert_eq!(render_pg_type(&ty), "TIMESTAMP(3)");

        let mut ty = pg("timestamp with time zone", "timestamptz");
        ty.datetime_precision = Some(0);
        assert_eq!(render_pg_type(&ty), "TIMESTAMP(0) WITH TIME ZONE");

        let mut ty = pg("time without time zone", "time");
        ty.datetime_precision = Some(0);
        assert_eq!(render_pg_type(&ty), "TIME(0)");
        ty.datetime_precision = Some(6);
        assert_eq!(render_pg_type(&ty), "TIME");
    }

    #[test]
    fn test_interval_fields() {
        let mut ty = pg("interval", "interval");
        ty.datetime_precision = Some(6);
        assert_eq!(render_pg_type(&ty), "INTERVAL");

        ty.interval_type = Some("DAY");
        assert_eq!(render_pg_type(&ty), "INTERVAL DAY");

        ty.interval_type = Some("DAY TO SECOND");
        ty.datetime_precision = Some(2);
        assert_eq!(render_pg_type(&ty), "INTERVAL DAY TO SECOND(2)");
    }

    #[test]
    fn test_precision_changes_are_visible() {
        let mut old = pg("timestamp without time zone", "timestamp");
        old.datetime_precision = Some(3);
        let mut new = old.clone();
        new.datetime_precision = Some(6);
        assert_ne!(render_pg_type(&old), render_pg_type(&new));
    }

    #[test]
    fn test_arrays_and_user_defined() {
        assert_eq!(render_pg_type(&pg("ARRAY", "_int4")), "INTEGER[]");
        assert_eq!(render_pg_type(&pg("ARRAY", "_text")), "TEXT[]");
        assert_eq!(render_pg_type(&pg("USER-DEFINED", "order_status")), "ORDER_STATUS");
    }

    #[test]
    fn test_sqlite_types() {
        assert_eq!(render_sqlite_type("integer"), "INTEGER");
        assert_eq!(render_sqlite_type("varchar(255)"), "VARCHAR(255)");
        assert_eq!(render_sqlite_type("double  precision"), "DOUBLE PRECISION");
        assert_eq!(render_sqlite_type(""), "");
    }
}
