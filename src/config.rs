//! Runtime configuration.
//!
//! Precedence, lowest first: built-in defaults, the TOML file, `CORSO_*`
//! environment variables, command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::engine::BoardLayout;
use crate::term::{SpriteBank, MAX_SCALE};
use crate::types::{BONNET_HEIGHT, BONNET_WIDTH, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Scheduler tick interval.
    pub tick_ms: u64,
    pub board_width: u8,
    pub board_height: u8,
    /// Horizontal scale of the terminal presenter.
    pub scale: u16,
    /// SSD1306 device node. Unset means desktop.
    pub panel_device: Option<PathBuf>,
    /// Artificial delay of `random` players.
    pub think_delay_ms: u64,
    pub seed: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS as u64,
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            scale: 1,
            panel_device: None,
            think_delay_ms: 0,
            seed: None,
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/corsoab/config.toml` (or the platform equivalent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("corsoab").join("config.toml"))
    }

    /// Defaults, then the config file, then the environment.
    ///
    /// An explicit path must exist; the default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env_from(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Apply `CORSO_TICK_MS`, `CORSO_PANEL_DEVICE` and `CORSO_SEED`.
    ///
    /// Unparsable numbers are ignored; an empty device disables the panel.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(ms) = lookup("CORSO_TICK_MS").and_then(|s| s.trim().parse().ok()) {
            self.tick_ms = ms;
        }
        if let Some(device) = lookup("CORSO_PANEL_DEVICE") {
            let device = device.trim();
            self.panel_device = if device.is_empty() {
                None
            } else {
                Some(PathBuf::from(device))
            };
        }
        if let Some(seed) = lookup("CORSO_SEED").and_then(|s| s.trim().parse().ok()) {
            self.seed = Some(seed);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            bail!("tick_ms must be at least 1");
        }
        if self.board_width == 0 || self.board_height == 0 {
            bail!(
                "board must have at least one cell, got {}x{}",
                self.board_width,
                self.board_height
            );
        }
        let (cell_w, cell_h) = SpriteBank::builtin().cell_size();
        let layout = BoardLayout::for_cell_size(cell_w, cell_h);
        if !layout.fits(self.board_width, self.board_height, BONNET_WIDTH, BONNET_HEIGHT) {
            let (right, bottom) = layout.extent(self.board_width, self.board_height);
            bail!(
                "a {}x{} board needs {right}x{bottom} pixels, the panel has {BONNET_WIDTH}x{BONNET_HEIGHT}",
                self.board_width,
                self.board_height
            );
        }
        if !(1..=MAX_SCALE).contains(&self.scale) {
            bail!("scale must be between 1 and {MAX_SCALE}, got {}", self.scale);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }
}
