//! Corso runner (default binary).
//!
//! Runs on the OLED bonnet when a panel device is configured, otherwise in
//! the terminal. Logs go to `--log-file`, never to the screen being drawn.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use corsoab::app::{build_players, initial_state, run_loop, Platform};
use corsoab::cli::Cli;
use corsoab::config::Config;
use corsoab::core::CorsoState;
use corsoab::engine::{DecisionPool, FramePacer, Game};
use corsoab::input::InputPump;
use corsoab::term::{PanelPresenter, TerminalSession};
use corsoab::types::Outcome;

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = cli.log_file.as_deref() {
        init_tracing(path);
    }

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config.validate()?;
    info!(?config, "starting");

    let lineup = cli.lineup();
    let pool = DecisionPool::new(lineup.len())?;
    let players = build_players(&lineup, &config, &pool);
    let state = initial_state(&config, players.len());

    let platform = Platform::select(cli.desktop, config.panel_device.as_deref(), |device| {
        PanelPresenter::open(device)
    });
    info!(desktop = platform.is_desktop(), "platform selected");
    let policy = platform.policy();
    let session = TerminalSession::enter(platform.is_desktop())
        .context("failed to prepare the terminal")?;

    let mut game = Game::new(state, players, policy, platform.into_presenter(config.scale))?;
    let result = run(&mut game, &config);

    // Always try to restore terminal state.
    drop(session);
    match result? {
        Some(outcome) => println!("{outcome}"),
        None => println!("game abandoned"),
    }
    Ok(())
}

fn run(game: &mut Game<CorsoState>, config: &Config) -> Result<Option<Outcome>> {
    game.start()?;
    let mut pump = InputPump::new();
    let mut pacer = FramePacer::new(config.tick_interval());
    run_loop(game, &mut pump, &mut pacer)
}

/// Without a writable log file the run is silent.
fn init_tracing(path: &Path) {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("logging disabled, cannot open {}: {e}", path.display());
            return;
        }
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
