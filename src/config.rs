//! Configuration loading.
//!
//! `config.toml` lives in `~/.faqbot/` unless `--config` points elsewhere.
//! Every section is optional; a missing file means all defaults. Relative
//! catalog paths resolve against the directory holding the config file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::conversation::DEFAULT_HISTORY_DEPTH;
use crate::render::DEFAULT_LABEL_MAX_CHARS;
use crate::search::KeywordMatch;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Telegram channel settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Catalog storage and seed settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Free-text search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Navigation and rendering settings.
    #[serde(default)]
    pub conversation: ConversationConfig,
}

/// Telegram-specific configuration.
#[derive(Debug, Deserialize)]
pub struct TelegramConfig {
    /// Environment variable name holding the bot token.
    #[serde(default = "default_token_env")]
    pub bot_token_env: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token_env: default_token_env(),
        }
    }
}

/// Catalog storage configuration.
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// SQLite database file.
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// JSON seed file used when the database is empty.
    #[serde(default = "default_seed_path")]
    pub seed_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            seed_path: default_seed_path(),
        }
    }
}

/// Free-text search configuration.
#[derive(Debug, Default, Deserialize)]
pub struct SearchConfig {
    /// How queries are compared with keyword tokens.
    #[serde(default)]
    pub keyword_match: KeywordMatch,
}

/// Navigation and rendering configuration.
#[derive(Debug, Deserialize)]
pub struct ConversationConfig {
    /// Navigation history kept per user (minimum 1).
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,

    /// Maximum characters of a question label in category lists.
    #[serde(default = "default_label_max_chars")]
    pub question_label_max_chars: usize,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            history_depth: default_history_depth(),
            question_label_max_chars: default_label_max_chars(),
        }
    }
}

// Default value functions for serde

fn default_token_env() -> String {
    "FAQBOT_TELEGRAM_TOKEN".to_owned()
}
fn default_database() -> PathBuf {
    PathBuf::from("faq.db")
}
fn default_seed_path() -> PathBuf {
    PathBuf::from("faq.json")
}
fn default_history_depth() -> usize {
    DEFAULT_HISTORY_DEPTH
}
fn default_label_max_chars() -> usize {
    DEFAULT_LABEL_MAX_CHARS
}

impl Config {
    /// Resolve relative catalog paths against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.catalog.database.is_relative() {
            self.catalog.database = base.join(&self.catalog.database);
        }
        if self.catalog.seed_path.is_relative() {
            self.catalog.seed_path = base.join(&self.catalog.seed_path);
        }
    }
}

/// Load the config from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config at {}: {e}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config at {}: {e}", path.display()))?;
    Ok(config)
}

/// Load the config if the file exists, otherwise return defaults.
///
/// Relative catalog paths are resolved against the file's directory.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read or parsed.
pub fn load_or_default(path: &Path) -> anyhow::Result<Config> {
    let mut config = if path.exists() {
        tracing::info!(path = %path.display(), "loading config from file");
        load_config(path)?
    } else {
        tracing::info!(path = %path.display(), "no config file found, using defaults");
        Config::default()
    };
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    config.resolve_paths(base);
    Ok(config)
}

/// Resolve the default config directory (`~/.faqbot/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".faqbot"))
}
