use anyhow::{Context, Result};
use clap::Parser;
use la_snake::game::GameConfig;
use la_snake::modes::HumanMode;
use la_snake::score::{FileScoreStore, ScoreStore};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "la_snake")]
#[command(version, about = "Grid snake game in the terminal")]
struct Cli {
    /// Grid width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// JSON game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    /// File holding the best score
    #[arg(long, default_value = "la-snake-high-score.json")]
    high_score_file: PathBuf,

    /// Forget the stored best score before playing
    #[arg(long)]
    reset_high_score: bool,

    /// Append logs to this file; the terminal itself belongs to the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Config file (or defaults), then command line overrides
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "la_snake=info".into()),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;

    let mut scores = FileScoreStore::open(&cli.high_score_file)?;
    if cli.reset_high_score {
        scores.clear();
    }
    info!(
        high_score = scores.get(),
        path = ?scores.path(),
        "Loaded high score"
    );

    let mut human_mode = HumanMode::new(config, Box::new(scores));
    human_mode.run().await?;

    Ok(())
}
