mod app;
mod cli;
mod commands;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use keysmith::{GeminiClient, create_theme, debug};
use std::io;
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();
    debug::init();

    match cli.command {
        Some(Commands::Init { force }) => {
            let path = cli
                .config
                .unwrap_or_else(|| PathBuf::from(keysmith::config::CONFIG_FILE_NAME));
            commands::run_init(&path, force)
        }
        Some(Commands::Predict { context }) => {
            let config = commands::load_config(cli.config.as_deref(), cli.theme.as_deref())?;
            let client = GeminiClient::from_config(&config.gemini);
            commands::run_predict(&client, &context, &mut io::stdout())
        }
        Some(Commands::Assist { text }) => {
            let config = commands::load_config(cli.config.as_deref(), cli.theme.as_deref())?;
            let client = GeminiClient::from_config(&config.gemini);
            commands::run_assist(&client, &text, &mut io::stdout())
        }
        Some(Commands::Theme { prompt }) => {
            let config = commands::load_config(cli.config.as_deref(), cli.theme.as_deref())?;
            let client = GeminiClient::from_config(&config.gemini);
            let base = create_theme(&config.theme);
            commands::run_theme(&client, &prompt, &base, &mut io::stdout())
        }
        Some(Commands::Themes) => {
            let config = commands::load_config(cli.config.as_deref(), cli.theme.as_deref())?;
            commands::run_themes(&create_theme(&config.theme), &mut io::stdout())
        }
        None => {
            let config = commands::load_config(cli.config.as_deref(), cli.theme.as_deref())?;
            commands::run_tui(&config)
        }
    }
}
