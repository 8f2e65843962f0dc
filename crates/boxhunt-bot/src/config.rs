use anyhow::{Context, Result};
use boxhunt_models::AssignmentConfig;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub game: GameConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TelegramConfig {
    /// Bot credential from @BotFather. Opaque to the game core.
    #[serde(default)]
    pub bot_token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Long-poll wait passed to getUpdates.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_url: default_api_url(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

/// Bounds for the per-round box layout.
#[derive(Debug, Deserialize, Serialize)]
pub struct GameConfig {
    #[serde(default = "default_min_total")]
    pub min_total: u8,
    #[serde(default = "default_max_total")]
    pub max_total: u8,
    #[serde(default = "default_min_golden")]
    pub min_golden: u8,
    #[serde(default = "default_max_golden")]
    pub max_golden: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_total: default_min_total(),
            max_total: default_max_total(),
            min_golden: default_min_golden(),
            max_golden: default_max_golden(),
        }
    }
}

impl GameConfig {
    pub fn assignment(&self) -> AssignmentConfig {
        AssignmentConfig {
            min_total: self.min_total,
            max_total: self.max_total,
            min_golden: self.min_golden,
            max_golden: self.max_golden,
        }
    }
}

fn default_api_url() -> String {
    "https://api.telegram.org".into()
}

fn default_poll_timeout() -> u64 {
    30
}

fn default_min_total() -> u8 {
    1
}

fn default_max_total() -> u8 {
    4
}

fn default_min_golden() -> u8 {
    0
}

fn default_max_golden() -> u8 {
    3
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if std::path::Path::new(path).exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config at '{path}'"))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse config at '{path}'"))?
        } else {
            tracing::info!("Config file not found at '{}', generating defaults...", path);
            let config = Config::default();
            if let Some(parent) = std::path::Path::new(path).parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, toml::to_string_pretty(&config)?)?;
            config
        };

        // Environment variable overrides
        if let Ok(value) = std::env::var("BOXHUNT_BOT_TOKEN") {
            config.telegram.bot_token = value;
        }
        if let Ok(value) = std::env::var("BOXHUNT_API_URL") {
            config.telegram.api_url = value;
        }

        config
            .game
            .assignment()
            .validate()
            .context("invalid [game] bounds in config")?;
        Ok(config)
    }
}
