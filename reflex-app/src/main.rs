mod app;
mod config;
mod input;
mod report;

use anyhow::Result;
use app::App;
use clap::Parser;
use config::AppConfig;
use reflex_game::{JsonFileStore, PersistenceGateway};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reflex", version, about = "Reaction-time game with a leaderboard")]
struct Cli {
    /// Config file (default: <config dir>/reflex/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Player data file
    #[arg(long)]
    data: Option<PathBuf>,
    /// TrueType font to draw text with
    #[arg(long)]
    font: Option<PathBuf>,
    /// Run in a window instead of fullscreen
    #[arg(long)]
    windowed: bool,
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
    /// Print leaderboard and distribution, then exit
    #[arg(long)]
    print_stats: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config =
        AppConfig::load(cli.config.as_deref())?.with_overrides(cli.data, cli.font, cli.windowed);

    if cli.print_stats {
        let store = JsonFileStore::new(&config.data_file);
        print!(
            "{}",
            report::format_report(&store.load(), config.game.leaderboard_size)
        );
        return Ok(());
    }

    App::new(config)?.run()?;
    info!("bye");
    Ok(())
}
