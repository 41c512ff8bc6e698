//! xetra CLI - Daily Xetra trading report ETL.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod logging;

use display::Format;

#[derive(Parser)]
#[command(name = "xetra")]
#[command(about = "Daily Xetra trading report ETL", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the daily report for a reference date
    Run {
        /// Reference date (YYYY-MM-DD). Partitions from the previous day onwards are read.
        #[arg(short, long)]
        date: String,

        /// Read source objects from this directory instead of the configured source
        #[arg(long)]
        source: Option<PathBuf>,

        /// Write the report to this directory instead of the configured target
        #[arg(long)]
        target: Option<PathBuf>,

        /// Report key prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Skip reading the stored report back
        #[arg(long)]
        no_verify: bool,
    },

    /// List stored reports in the target
    Reports {
        /// List this directory instead of the configured target
        #[arg(long)]
        target: Option<PathBuf>,
    },

    /// Print a stored report
    Inspect {
        /// Report key
        key: String,

        /// Read from this directory instead of the configured target
        #[arg(long)]
        target: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    logging::init(cli.verbose)?;

    match command {
        Commands::Run {
            date,
            source,
            target,
            prefix,
            no_verify,
        } => {
            let options = commands::run::RunOptions {
                source,
                target,
                prefix,
                verify: !no_verify,
            };
            commands::run::run(&date, cli.config.as_deref(), options, cli.quiet).await
        }
        Commands::Reports { target } => {
            commands::reports::list_reports(cli.config.as_deref(), target).await
        }
        Commands::Inspect {
            key,
            target,
            format,
        } => commands::inspect::inspect(&key, cli.config.as_deref(), target, format).await,
    }
}
