//! pears-docs CLI - deploy and manage the Pears documentation site.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "pears-docs")]
#[command(about = "Deploy and manage the Pears documentation site")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to docs.toml config file
    #[arg(short, long, default_value = "docs.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the built site (default)
    Deploy,

    /// Validate the site descriptor
    Check,

    /// Write the site descriptor as generator JSON
    Export {
        /// Output file (defaults to .vitepress/site.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a docs.toml with the default Pears descriptor
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        yes: bool,
    },

    /// Preview the built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4173")]
        port: u16,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Deploy) {
        Commands::Deploy => commands::deploy::run(&cli.config).await,
        Commands::Check => commands::check::run(&cli.config).await,
        Commands::Export { output } => commands::export::run(&cli.config, output).await,
        Commands::Init { yes } => commands::init::run(&cli.config, yes).await,
        Commands::Serve { port, no_open } => {
            commands::serve::run(&cli.config, port, !no_open).await
        }
    }
}
