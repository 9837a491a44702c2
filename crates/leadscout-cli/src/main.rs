mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "leadscout-cli")]
#[command(about = "LeadScout command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search Google Places and print enriched results
    Search {
        /// Free-text query, e.g. "coffee shop boston"
        query: String,
        /// Print results as pretty JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Download the image behind a photo URL printed by `search`
    Photo {
        /// Photo URL from a search result
        url: String,
        /// File to write the image to
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("leadscout-cli: run with --help to list commands");
        return Ok(());
    };

    let config = leadscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Search { query, json } => search::run_search(&config, &query, json).await,
        Commands::Photo { url, output } => search::run_photo_download(&config, &url, &output).await,
    }
}
