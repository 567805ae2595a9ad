//! Configuration file support.
//!
//! ```toml
//! [old]
//! url = "postgres://deploy@prod-replica/app"
//!
//! [new]
//! url = "postgres://deploy@staging/app"
//!
//! [introspection]
//! schemas = ["sales", "billing"]
//! ```
//!
//! Lookup order: explicit path, `./dbcc.toml`, then `<config dir>/dbcc/dbcc.toml`.
//! Values given on the command line (or through the environment) win over
//! the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{DbccError, DbccResult};

pub const CONFIG_FILE: &str = "dbcc.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub old: Endpoint,
    #[serde(default)]
    pub new: Endpoint,
    #[serde(default)]
    pub introspection: Introspection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Endpoint {
    /// Database URL or path to a `.json` snapshot.
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Introspection {
    #[serde(default)]
    pub schemas: Vec<String>,
}

/// The two sides of a comparison after merging flags and file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub old: String,
    pub new: String,
    pub schemas: Vec<String>,
}

impl Config {
    pub fn from_toml(content: &str) -> DbccResult<Self> {
        toml::from_str(content).map_err(|e| DbccError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> DbccResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| DbccError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the config file, if there is one.
    ///
    /// An explicit path must exist; the default locations are optional.
    pub fn load(explicit: Option<&Path>) -> DbccResult<Self> {
        if let Some(path) = explicit {
            debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        for path in default_paths() {
            if path.exists() {
                debug!("Loading config from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Merge command-line values over the file and check both sides are set.
    pub fn resolve(
        self,
        old: Option<String>,
        new: Option<String>,
        schemas: Vec<String>,
    ) -> DbccResult<Resolved> {
        let old = old.or(self.old.url).ok_or_else(|| {
            DbccError::Config("no old database given. Use --old, DBCC_OLD_URL or [old] url".into())
        })?;
        let new = new.or(self.new.url).ok_or_else(|| {
            DbccError::Config("no new database given. Use --new, DBCC_NEW_URL or [new] url".into())
        })?;
        let schemas = if schemas.is_empty() {
            self.introspection.schemas
        } else {
            schemas
        };

        Ok(Resolved { old, new, schemas })
    }
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("dbcc").join(CONFIG_FILE));
    }
    paths
}
