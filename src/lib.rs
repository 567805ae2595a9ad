//! # dbcc — Database Compatibility Check
//!
//! > **Catch breaking schema changes before they ship.**
//!
//! dbcc reflects the tables and columns of an old (deployed) and a new
//! (candidate) database and reports what a consumer of the old schema
//! would trip over.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use dbcc::prelude::*;
//!
//! let options = IntrospectOptions::default();
//! let old = snapshot_url("postgres://prod/app", &options).await?;
//! let new = snapshot_url("postgres://staging/app", &options).await?;
//!
//! let report = diff(&old, &new);
//! Reporter::new(OutputFormat::Text).print(&report)?;
//! ```
//!
//! ## Severities
//!
//! | Change                      | Reported as |
//! |-----------------------------|-------------|
//! | table removed               | `ERROR`     |
//! | column removed              | `ERROR`     |
//! | column type changed         | `WARNING`   |
//! | table or column added       | nothing     |

pub mod check;
pub mod config;
pub mod diff;
pub mod error;
pub mod introspect;
pub mod report;
pub mod snapshot;

pub mod prelude {
    pub use crate::diff::{Change, DiffReport, Severity, diff};
    pub use crate::error::*;
    pub use crate::introspect::{Dialect, IntrospectOptions, Introspector, snapshot_url};
    pub use crate::report::{OutputFormat, Reporter, exit_status};
    pub use crate::snapshot::{Column, SchemaSnapshot, Table};
}

pub use diff::diff;
