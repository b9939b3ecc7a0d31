//! Init command implementation

use anyhow::Result;
use keysmith::Config;
use keysmith::gemini::API_KEY_ENV_VARS;
use std::io::{self, Write};
use std::path::Path;

/// Run the init command
pub fn run_init(path: &Path, force: bool) -> Result<()> {
    println!("🚀 Initializing keysmith...\n");

    if !path.exists() || force {
        Config::generate_default(path)?;
        println!("✅ Created configuration: {}", path.display());
    } else {
        println!(
            "📄 Configuration file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    println!("\n---\n");

    check_api_key();

    println!("\n🎉 keysmith initialization complete!");
    println!("\nUsage:");
    println!("  1. Run 'keysmith' to open the keyboard");
    println!("  2. Arrow keys move over the keys, Tab presses the highlighted one");
    println!("  3. F1-F3 accept suggestions, Ctrl+A asks the assistant to fix the text");
    println!("  4. Ctrl+T picks a preset, Ctrl+G generates a theme from a description");

    Ok(())
}

/// Report whether a Gemini API key is available from the environment
pub fn check_api_key() {
    print!("🔑 Gemini API key: ");
    io::stdout().flush().ok();

    let found = API_KEY_ENV_VARS
        .iter()
        .find(|var| std::env::var(var).map(|v| !v.is_empty()).unwrap_or(false));

    match found {
        Some(var) => println!("✅ Found ({var} environment variable)"),
        None => {
            println!("⚠️  Not found in the environment");
            println!("   To enable predictions and AI features:");
            println!("   - Set GEMINI_API_KEY environment variable, or");
            println!("   - Set api_key under [gemini] in .keysmith.toml");
            println!("   Without a key every AI feature returns its fallback.");
        }
    }
}
