//! Command implementations

pub mod assist;
pub mod init;
pub mod themes;
pub mod tui;

pub use assist::{run_assist, run_predict, run_theme};
pub use init::run_init;
pub use themes::run_themes;
pub use tui::run_tui;

use anyhow::Result;
use keysmith::{Config, PresetId, debug};
use std::path::Path;

/// Load the configuration and apply command-line overrides
///
/// An explicit path must exist; the default path falls back to defaults.
pub fn load_config(path: Option<&Path>, theme: Option<&str>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(theme) = theme {
        let id: PresetId = theme
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown theme: {theme} (run 'keysmith themes')"))?;
        config.theme = id.id().to_string();
    }

    debug::log_category("config", &format!("theme={} model={}", config.theme, config.gemini.model));
    Ok(config)
}
