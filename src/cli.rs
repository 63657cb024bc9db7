use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Config;
use crate::types::DEFAULT_PLAYER_COUNT;

/// Corso on the 128x64 OLED bonnet, or in a terminal.
#[derive(Debug, Parser)]
#[command(name = "corsoab", version, about)]
pub struct Cli {
    /// Run in the terminal even if a panel is configured.
    #[arg(short, long)]
    pub desktop: bool,

    /// Horizontal scale of the terminal rendering.
    #[arg(short, long, value_name = "N")]
    pub scale: Option<u16>,

    /// Player type, in turn order. Repeat for each player.
    #[arg(short = 'p', long = "player", value_name = "TYPE")]
    pub players: Vec<PlayerType>,

    /// Config file (default: $XDG_CONFIG_HOME/corsoab/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs here. Without it nothing is logged.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerType {
    /// Keyboard or joystick.
    User,
    /// Uniformly random legal moves.
    Random,
}

impl Cli {
    /// Players in turn order, padded with `user` to the default count.
    pub fn lineup(&self) -> Vec<PlayerType> {
        let mut lineup = self.players.clone();
        if lineup.len() < DEFAULT_PLAYER_COUNT {
            lineup.resize(DEFAULT_PLAYER_COUNT, PlayerType::User);
        }
        lineup
    }

    /// Flags take precedence over file and environment.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
    }
}
