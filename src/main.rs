use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use snake_arcade::app::App;
use snake_arcade::audio::AudioCues;
use snake_arcade::game::GameConfig;
use snake_arcade::score::HighScoreStore;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Classic grid snake for the terminal")]
struct Cli {
    /// Side length of the square grid, in cells
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i32).range(4..=64))]
    grid_size: i32,

    /// Milliseconds between simulation ticks
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Where the high score lives between runs
    #[arg(long, default_value = "snake_highscore.json")]
    high_score_file: PathBuf,

    /// Start with sound cues switched off
    #[arg(long)]
    muted: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig {
        grid_size: cli.grid_size,
        tick_ms: cli.tick_ms,
        ..Default::default()
    };

    let scores = HighScoreStore::load(cli.high_score_file)?;
    let audio = AudioCues::new(!cli.muted);

    App::new(config, scores, audio).run().await
}
