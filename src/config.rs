//! Configuration file support for keysmith
//!
//! Handles `.keysmith.toml` configuration file loading and saving.

use crate::gemini::{
    DEFAULT_ASSIST_MAX_TOKENS, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PREDICT_MAX_TOKENS,
    DEFAULT_PREDICT_TEMPERATURE,
};
use crate::keys::Layout;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = ".keysmith.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Starting theme preset: "material-you", "dark-mode", "pixel-blue", "cyberpunk"
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Gemini API configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Keyboard behavior
    #[serde(default)]
    pub keyboard: KeyboardConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            gemini: GeminiConfig::default(),
            keyboard: KeyboardConfig::default(),
        }
    }
}

fn default_theme() -> String {
    "material-you".to_string()
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key (can also be set via GEMINI_API_KEY or API_KEY env var)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to use (default: gemini-3-flash-preview)
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// REST endpoint root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature for predictions (default: 0.7)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output token cap for predictions (default: 20)
    #[serde(default = "default_predict_max_tokens")]
    pub predict_max_tokens: u32,

    /// Output token cap for text assist (default: 50)
    #[serde(default = "default_assist_max_tokens")]
    pub assist_max_tokens: u32,

    /// Request timeout in seconds (default: 30, values below 1 count as 1)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_gemini_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_PREDICT_TEMPERATURE
}

fn default_predict_max_tokens() -> u32 {
    DEFAULT_PREDICT_MAX_TOKENS
}

fn default_assist_max_tokens() -> u32 {
    DEFAULT_ASSIST_MAX_TOKENS
}

/// A zero timeout would fail every request
const MIN_TIMEOUT_SECS: u64 = 1;

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            predict_max_tokens: default_predict_max_tokens(),
            assist_max_tokens: default_assist_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Keyboard behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardConfig {
    /// Quiet period before predictions refresh, in milliseconds (default: 600)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Layout shown at startup (default: qwerty)
    #[serde(default)]
    pub default_layout: Layout,
}

fn default_debounce_ms() -> u64 {
    600
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            default_layout: Layout::default(),
        }
    }
}

impl GeminiConfig {
    /// HTTP timeout, never shorter than one second
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(MIN_TIMEOUT_SECS))
    }
}

impl KeyboardConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    /// Load configuration file (returns default if not found)
    ///
    /// Searches for `.keysmith.toml` in the current directory.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from(CONFIG_FILE_NAME);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from specified path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to specified path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default(path: &Path) -> Result<()> {
        let config = Config::default();
        config.save_to(path)
    }
}
