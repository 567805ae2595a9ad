//! Rendering a [`DiffReport`] for humans and machines.

use clap::ValueEnum;
use colored::*;

use crate::diff::DiffReport;
use crate::error::{DbccError, DbccResult};

/// Output format for the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `WARNING: ...` / `ERROR: ...` lines
    #[default]
    Text,
    /// `{"warnings": [...], "errors": [...]}`
    Json,
}

/// Prints warnings first, then errors.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    format: OutputFormat,
    color: bool,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: false,
        }
    }

    /// Colour the severity prefixes in text output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Render the full report. Text output is one message per line.
    pub fn render(&self, report: &DiffReport) -> DbccResult<String> {
        match self.format {
            OutputFormat::Text => Ok(self.lines(report).join("\n")),
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .map_err(|e| DbccError::Snapshot(e.to_string())),
        }
    }

    /// Text lines: every warning, then every error.
    pub fn lines(&self, report: &DiffReport) -> Vec<String> {
        let (warning, error) = if self.color {
            ("WARNING:".yellow().bold().to_string(), "ERROR:".red().bold().to_string())
        } else {
            ("WARNING:".to_string(), "ERROR:".to_string())
        };

        report
            .warnings
            .iter()
            .map(|w| format!("{} {}", warning, w))
            .chain(report.errors.iter().map(|e| format!("{} {}", error, e)))
            .collect()
    }

    /// Write the report to stdout. Nothing is printed for a clean text report.
    pub fn print(&self, report: &DiffReport) -> DbccResult<()> {
        let rendered = self.render(report)?;
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
        Ok(())
    }
}

/// Process exit status for breaking changes.
pub const EXIT_BREAKING: u8 = 1;

/// `1` if and only if the report has errors. Warnings never fail.
pub fn exit_status(report: &DiffReport) -> u8 {
    if report.has_errors() { EXIT_BREAKING } else { 0 }
}
