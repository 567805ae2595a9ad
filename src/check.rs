//! End-to-end check: load both sides, then diff.

use std::path::Path;

use tracing::{debug, info};

use crate::config::Resolved;
use crate::diff::{DiffReport, diff};
use crate::error::DbccResult;
use crate::introspect::{IntrospectOptions, redact_url, snapshot_url};
use crate::snapshot::SchemaSnapshot;

/// True when `source` names a snapshot file rather than a database.
pub fn is_snapshot_file(source: &str) -> bool {
    if source.starts_with("sqlite:") || source.contains("://") {
        return false;
    }
    source.ends_with(".json")
}

/// Load one side of the comparison from a database URL or a snapshot file.
pub async fn load_snapshot(source: &str, options: &IntrospectOptions) -> DbccResult<SchemaSnapshot> {
    if is_snapshot_file(source) {
        debug!("Reading snapshot file {}", source);
        let content = tokio::fs::read_to_string(Path::new(source)).await?;
        return SchemaSnapshot::from_json(&content);
    }
    snapshot_url(source, options).await
}

/// Load old then new, and compare them.
///
/// Any failure to load either side is returned before diffing starts.
pub async fn run(resolved: &Resolved) -> DbccResult<DiffReport> {
    let options = IntrospectOptions {
        schemas: resolved.schemas.clone(),
    };

    info!("Loading old schema from {}", redact_url(&resolved.old));
    let old = load_snapshot(&resolved.old, &options).await?;
    info!("Loading new schema from {}", redact_url(&resolved.new));
    let new = load_snapshot(&resolved.new, &options).await?;

    let report = diff(&old, &new);
    info!(
        "{} error(s), {} warning(s)",
        report.errors.len(),
        report.warnings.len()
    );
    Ok(report)
}
