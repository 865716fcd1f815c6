//! Ball Runner entry point
//!
//! Native builds run the game headless: the autopilot plays a fixed number
//! of ticks and a JSON summary of each run is printed to stdout.
//!
//! ```text
//! ball-runner [--seed N] [--ticks N] [--restarts N] [--tuning path.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::Parser;
    use serde::Serialize;
    use thiserror::Error;

    use ball_runner::platform::headless::{LogHud, LogScene};
    use ball_runner::sim::GameState;
    use ball_runner::{Game, Tuning, TuningError};

    #[derive(Debug, Error)]
    pub enum CliError {
        #[error("cannot read {}: {source}", path.display())]
        Io {
            path: PathBuf,
            source: std::io::Error,
        },
        #[error(transparent)]
        Tuning(#[from] TuningError),
        #[error("cannot encode summary: {0}")]
        Summary(#[from] serde_json::Error),
    }

    #[derive(Debug, Parser)]
    #[command(name = "ball-runner")]
    #[command(about = "Run Ball Runner headless with the autopilot and print a JSON summary")]
    pub struct Args {
        /// RNG seed for the session
        #[arg(long, default_value_t = 0)]
        pub seed: u64,
        /// Frames to simulate
        #[arg(long, default_value_t = 3_600)]
        pub ticks: u64,
        /// Automatic restarts after game over
        #[arg(long, default_value_t = 0)]
        pub restarts: u32,
        /// JSON file with tuning overrides
        #[arg(long)]
        pub tuning: Option<PathBuf>,
    }

    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub score: u64,
        pub level: u32,
        pub ticks: u64,
        pub crashed: bool,
    }

    #[derive(Debug, Serialize)]
    pub struct Summary {
        pub seed: u64,
        pub tuning: Tuning,
        pub runs: Vec<RunSummary>,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning, CliError> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Tuning::from_json(&json)?)
    }

    pub fn run(args: &Args) -> Result<String, CliError> {
        let tuning = load_tuning(args.tuning.as_ref())?;
        let state = GameState::with_tuning(args.seed, tuning.clone())?;
        let mut game = Game::new(state, LogScene::default(), LogHud::default());
        game.set_autopilot(true);

        let mut runs = Vec::new();
        let mut restarts_left = args.restarts;
        for _ in 0..args.ticks {
            game.frame();
            if game.state().is_active() {
                continue;
            }
            runs.push(finish(game.state(), true));
            if restarts_left == 0 {
                break;
            }
            restarts_left -= 1;
            game.restart();
        }
        if game.state().is_active() {
            runs.push(finish(game.state(), false));
        }

        log::info!(
            "{} run(s), {} frames presented",
            runs.len(),
            game.scene().frames()
        );

        let summary = Summary {
            seed: args.seed,
            tuning,
            runs,
        };
        Ok(serde_json::to_string_pretty(&summary)?)
    }

    fn finish(state: &GameState, crashed: bool) -> RunSummary {
        RunSummary {
            score: state.session.score,
            level: state.session.level,
            ticks: state.time_ticks,
            crashed,
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;
    use std::process::ExitCode;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ball Runner (headless) starting...");

    let args = cli::Args::parse();
    match cli::run(&args) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser build drives `ball_runner::Game` from its own frame callback
}
