//! dbcc — Database Compatibility Check CLI
//!
//! Compares an old and a new database and fails when the new one drops
//! tables or columns the old one had.
//!
//! # Usage
//!
//! ```bash
//! # Gate a deployment
//! dbcc --old postgres://prod-replica/app --new postgres://staging/app
//!
//! # Pin the deployed schema, then compare against it later
//! dbcc dump postgres://prod-replica/app > prod.json
//! dbcc --old prod.json --new postgres://staging/app
//! ```
//!
//! Exit status: `0` no breaking changes, `1` breaking changes, `2` could
//! not load a schema.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dbcc::prelude::*;
use dbcc::{check, config::Config, introspect::redact_url};
use tracing_subscriber::EnvFilter;

/// Exit status when a schema could not be loaded at all.
const EXIT_FATAL: u8 = 2;

#[derive(Parser)]
#[command(name = "dbcc")]
#[command(version)]
#[command(about = "Checks for breaking changes between DB versions", long_about = None)]
#[command(after_help = "EXAMPLES:
    dbcc -o postgres://prod/app -n postgres://staging/app
    dbcc -o prod.json -n sqlite://build/app.db --format json
    dbcc dump postgres://prod/app --schema sales")]
struct Cli {
    /// Old DB dsn (or a .json snapshot)
    #[arg(short, long, env = "DBCC_OLD_URL")]
    old: Option<String>,

    /// New DB dsn (or a .json snapshot)
    #[arg(short, long, env = "DBCC_NEW_URL")]
    new: Option<String>,

    /// Extra schema to reflect, with qualified table names (repeatable)
    #[arg(long = "schema", global = true)]
    schemas: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Config file (default: ./dbcc.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the reflected schema of one database as JSON
    Dump {
        /// Database URL
        url: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Dump { url }) => dump(url, &cli.schemas).await.map(|_| 0),
        None => run_check(&cli).await,
    };

    match result {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "dbcc=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run_check(cli: &Cli) -> Result<u8> {
    let resolved = Config::load(cli.config.as_deref())
        .context("Failed to load config")?
        .resolve(cli.old.clone(), cli.new.clone(), cli.schemas.clone())?;

    let report = check::run(&resolved).await.with_context(|| {
        format!(
            "Failed to compare {} with {}",
            redact_url(&resolved.old),
            redact_url(&resolved.new)
        )
    })?;

    Reporter::new(cli.format)
        .with_color(std::io::stdout().is_terminal())
        .print(&report)?;

    Ok(exit_status(&report))
}

async fn dump(url: &str, schemas: &[String]) -> Result<()> {
    let options = IntrospectOptions {
        schemas: schemas.to_vec(),
    };
    let snapshot = snapshot_url(url, &options)
        .await
        .with_context(|| format!("Failed to reflect {}", redact_url(url)))?;

    println!("{}", snapshot.to_json()?);
    Ok(())
}
