mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser)]
#[command(name = "freshboard")]
#[command(about = "Cold-chain scan analytics dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard HTTP server
    Serve {
        #[arg(short, long, default_value = "8501")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Print a bcrypt hash for provisioning the users table
    HashPassword {
        password: String,
        #[arg(short, long, default_value = "12")]
        cost: u32,
    },
    /// Print the freshness score and range flag of one reading
    Score {
        #[arg(allow_hyphen_values = true)]
        measured: f64,
        #[arg(allow_hyphen_values = true)]
        ideal: f64,
    },
}

/// `RUST_LOG` when it is set and valid, `info` otherwise.
fn log_filter(spec: Option<&str>) -> EnvFilter {
    spec.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await?,
        Commands::HashPassword { password, cost } => {
            commands::tools::hash_password(&password, cost)?;
        },
        Commands::Score { measured, ideal } => commands::tools::score(measured, ideal)?,
    }

    Ok(())
}
