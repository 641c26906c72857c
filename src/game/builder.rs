// Game configuration and the builder that accumulates it.
// Defaults mirror the stock board: 10 seconds, 5 carrots, 5 bugs, 80px icons.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

pub const DEFAULT_GAME_DURATION_SEC: u32 = 10;
pub const DEFAULT_CARROT_COUNT: u32 = 5;
pub const DEFAULT_BUG_COUNT: u32 = 5;
pub const DEFAULT_ITEM_SIZE: f64 = 80.0;

/// Image and sound locations, relative to the host page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub carrot_img: String,
    pub bug_img: String,
    pub carrot_sound: String,
    pub bug_sound: String,
    pub bgm: String,
    pub alert_sound: String,
    pub win_sound: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            carrot_img: "img/carrot.png".into(),
            bug_img: "img/bug.png".into(),
            carrot_sound: "sound/carrot_pull.mp3".into(),
            bug_sound: "sound/bug_pull.mp3".into(),
            bgm: "sound/bg.mp3".into(),
            alert_sound: "sound/alert.wav".into(),
            win_sound: "sound/game_win.mp3".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub game_duration_sec: u32,
    pub carrot_count: u32,
    pub bug_count: u32,
    /// Icon edge length in CSS pixels; keeps items fully inside the field.
    pub item_size: f64,
    pub assets: AssetPaths,
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_duration_sec: DEFAULT_GAME_DURATION_SEC,
            carrot_count: DEFAULT_CARROT_COUNT,
            bug_count: DEFAULT_BUG_COUNT,
            item_size: DEFAULT_ITEM_SIZE,
            assets: AssetPaths::default(),
            log_level: "info".into(),
        }
    }
}

impl GameConfig {
    /// Parse a JSON config from the host page. Missing keys fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.game_duration_sec == 0 {
            return Err(GameError::invalid_config("game_duration_sec must be at least 1"));
        }
        if self.carrot_count == 0 {
            return Err(GameError::invalid_config("carrot_count must be at least 1"));
        }
        if !(self.item_size.is_finite() && self.item_size > 0.0) {
            return Err(GameError::invalid_config(format!(
                "item_size must be a positive number, got {}",
                self.item_size
            )));
        }
        if self.log_level.parse::<tracing::Level>().is_err() {
            return Err(GameError::invalid_config(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

/// Accumulates settings, then validates them in [`GameBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    config: GameConfig,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game_duration(mut self, sec: u32) -> Self {
        self.config.game_duration_sec = sec;
        self
    }

    pub fn carrot_count(mut self, n: u32) -> Self {
        self.config.carrot_count = n;
        self
    }

    pub fn bug_count(mut self, n: u32) -> Self {
        self.config.bug_count = n;
        self
    }

    pub fn item_size(mut self, px: f64) -> Self {
        self.config.item_size = px;
        self
    }

    pub fn assets(mut self, assets: AssetPaths) -> Self {
        self.config.assets = assets;
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    pub fn build(self) -> Result<GameConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
