use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use simplelog::LevelFilter;
use term_snake::game::{FoodPlacement, GameConfig};
use term_snake::logging::init_file_logger;
use term_snake::modes::PlayMode;

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Edge length of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Tick period at the start of each game, in milliseconds
    #[arg(long)]
    initial_delay_ms: Option<u64>,

    /// Shortest tick period the speed ramp reaches, in milliseconds
    #[arg(long)]
    delay_floor_ms: Option<u64>,

    /// Whether new food may land on the snake
    #[arg(long, value_enum)]
    food_placement: Option<FoodPlacement>,

    /// Where to write the log
    #[arg(long, default_value = "term_snake.log")]
    log_file: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(delay) = self.initial_delay_ms {
            config.initial_delay_ms = delay;
        }
        if let Some(floor) = self.delay_floor_ms {
            config.delay_floor_ms = floor;
        }
        if let Some(placement) = self.food_placement {
            config.food_placement = placement;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.game_config()?;
    init_file_logger(&cli.log_file, cli.log_level.into())?;
    info!("Starting term_snake with {:?}", config);

    let mut play_mode = PlayMode::new(config);
    play_mode.run().await
}
