mod commands;
mod error;
mod paths;

use std::fs::File;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};
use showtix_lib::model::ShowId;
use showtix_lib::{Config, ShowsClient};
use simplelog::{LevelFilter, WriteLogger};

use crate::error::Result;

#[derive(Parser)]
#[command(name = "showtix", about = "Browse shows and buy tickets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List shows grouped by category
    List {
        /// Only shows whose title or category contains this text
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show one show's details
    Show {
        /// Show id
        id: String,
    },
    /// Buy tickets for a show
    Buy {
        /// Show id
        id: String,
    },
}

/// Starts logging to `latest.log` in the cache directory.
///
/// Logging is skipped when no cache directory is available.
fn init_logging() -> Result<()> {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let file = File::create(&path)?;
    WriteLogger::init(LevelFilter::Debug, simplelog::Config::default(), file)?;
    info!("Logging to {}", path.display());
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    let client = ShowsClient::builder()
        .url(&config.api_url)
        .timeout(config.timeout)
        .build()?;
    info!("Using shows API at {}", client.base_url());

    match cli.command {
        Commands::List { search } => commands::list::run(&client, search.as_deref()).await,
        Commands::Show { id } => commands::show::run(&client, &config, &ShowId::new(id)).await,
        Commands::Buy { id } => commands::buy::run(&client, &config, ShowId::new(id)).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("Warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
