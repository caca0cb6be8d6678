//! HeartCare CLI: terminal front-end for heart-disease risk assessment.
//!
//! Collects patient vitals from flags (or a JSON file), runs them through the
//! core pipeline and prints the verdict.

mod commands;
mod render;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// HeartCare: heart-disease risk assessment
#[derive(Parser, Debug)]
#[command(name = "heartcare", version, about, long_about = None)]
struct Cli {
    /// Workspace directory (relative artifact paths resolve against it)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Artifact directory, overriding configuration
    #[arg(short, long)]
    artifacts: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run one risk assessment
    Assess(commands::AssessArgs),
    /// Load the artifacts and report how they line up with the feature catalog
    Check,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _log_guard = init_logging(stderr_level(cli.verbose, cli.quiet));

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut config = heartcare_core::load_config(Some(&workspace), cli.config.as_deref(), None)
        .context("Failed to load HeartCare configuration")?;
    if let Some(dir) = cli.artifacts {
        config.artifacts.dir = dir;
    }

    match cli.command {
        Commands::Assess(args) => commands::assess(&args, &config, &workspace),
        Commands::Check => commands::check(&config, &workspace),
        Commands::Config {
            action: ConfigAction::Show,
        } => commands::show_config(&config),
    }
}

/// Stderr log level for the `-v`/`-q` flags. `-q` only applies without `-v`.
fn stderr_level(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Human-readable logs on stderr at `level`, plus a daily JSON log file at
/// debug level under the user's data directory. Keep the guard alive until
/// exit so the file writer flushes.
fn init_logging(level: &str) -> WorkerGuard {
    let log_dir = directories::ProjectDirs::from("dev", "heartcare", "heartcare")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "heartcare.log"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::new(level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(file_writer)
                .with_filter(EnvFilter::new("debug")),
        )
        .init();
    guard
}
