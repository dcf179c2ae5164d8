//=========================================================================
// endless-runner
//
// Usage: endless-runner [config.ron]
//
// Builds the runner from the log-backed display, the RON high-score store,
// the logging score reporter and the headless track, then hands it to the
// engine. Log level follows RUST_LOG (default: info).
//
//=========================================================================

use std::error::Error;
use std::path::PathBuf;
use std::process;

use log::{error, info};

use endless_runner::config::RunnerConfig;
use endless_runner::game::Runner;
use endless_runner::services::{ChannelReporter, HeadlessTrack, LogDisplay, RonStore};
use endless_runner::EngineBuilder;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    if let Err(err) = run(config_path) {
        error!("{}", err);
        eprintln!("endless-runner: {}", err);

        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        process::exit(1);
    }
}

fn run(config_path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let config = match config_path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            RunnerConfig::load(&path)?
        }
        None => RunnerConfig::default(),
    };

    let store = RonStore::open_or_default(config.resolved_save_path());
    info!("High scores in {}", store.path().display());

    let runner = Runner::new(
        &config,
        LogDisplay::new(),
        store,
        ChannelReporter::logging(),
        HeadlessTrack::default(),
    );

    EngineBuilder::new()
        .with_tps(config.tps)
        .with_channel_capacity(config.channel_capacity)
        .build(runner)
        .run()?;

    Ok(())
}
