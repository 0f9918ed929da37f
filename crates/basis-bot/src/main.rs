//! basis-bot entry point.

use anyhow::Result;
use basis_bot::{app, config::AppConfig, logging};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "basis-bot", about = "Two-instrument market-making engine")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// JSONL event file to replay; reads stdin when omitted.
    #[arg(long)]
    replay: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging()?;
    let args = Args::parse();

    let config = if args.config.exists() {
        AppConfig::load(&args.config)?
    } else {
        info!(path = %args.config.display(), "no config file, using defaults");
        AppConfig::default()
    };
    config.validate()?;
    info!(mode = ?config.mode, "starting basis engine");

    match args.replay {
        Some(path) => {
            let file = tokio::fs::File::open(&path).await?;
            app::run(config, tokio::io::BufReader::new(file)).await?;
        }
        None => {
            app::run(config, tokio::io::BufReader::new(tokio::io::stdin())).await?;
        }
    }
    Ok(())
}
