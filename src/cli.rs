//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keysmith")]
#[command(author, version, about = "AI-assisted virtual keyboard for the terminal")]
pub struct Cli {
    /// Configuration file (default: ./.keysmith.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Theme preset to start with, overriding the configuration
    #[arg(short, long, global = true)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default .keysmith.toml in the current directory
    Init {
        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
    /// Predict the next words for a context
    Predict {
        /// Text typed so far
        context: String,
    },
    /// Fix grammar and spelling of a text
    Assist {
        /// Text to improve
        text: String,
    },
    /// Generate a keyboard palette from a description
    Theme {
        /// Style description, e.g. "ocean at dusk"
        prompt: String,
    },
    /// List the preset themes
    Themes,
}
