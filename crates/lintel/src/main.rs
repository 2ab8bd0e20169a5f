//! Lintel CLI - static page assembler for a personal site.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "lintel")]
#[command(about = "Static page assembler for a personal site")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to site.toml config file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a site in the current directory
    Init {
        /// Skip interactive prompts, use defaults
        #[arg(short, long)]
        yes: bool,
    },

    /// Assemble pages: inject fragments, render memo tables, sync metadata
    Assemble {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the cache-busting parameter on fragment loads
        #[arg(long)]
        no_cache_bust: bool,
    },

    /// Preview assembled pages
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve (defaults to the configured output)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Send a subscription to the mailing-list endpoint
    Subscribe {
        /// Email address to subscribe
        #[arg(short, long)]
        email: String,

        /// Subscription source label
        #[arg(long, default_value = "novel-platform")]
        source: String,

        /// Endpoint URL
        #[arg(long)]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes).await?;
        }
        Commands::Assemble {
            output,
            no_cache_bust,
        } => {
            commands::assemble::run(&cli.config, output, !no_cache_bust).await?;
        }
        Commands::Serve { port, dir } => {
            commands::serve::run(&cli.config, port, dir).await?;
        }
        Commands::Subscribe {
            email,
            source,
            endpoint,
        } => {
            commands::subscribe::run(&email, &source, &endpoint).await?;
        }
    }

    Ok(())
}
