//! TUI command implementation

use crate::app::{App, AppMode};
use crate::tui::{
    handle_keybinding, handle_prompt_input, handle_theme_picker_input, handle_typing_input, ui,
};
use anyhow::{Context, Result};
use crossterm::{
    cursor::Hide,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use keysmith::{Config, debug};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

/// Run the TUI application
pub fn run_tui(config: &Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    execute!(stdout, crossterm::terminal::SetTitle("keysmith"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = event_loop(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        crossterm::cursor::Show,
        LeaveAlternateScreen
    )?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Debounce deadlines and finished requests
        app.update(Instant::now());

        terminal.draw(|f| ui(f, app))?;

        // Poll events (16ms ≈ 60fps)
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    debug::log(&format!("KEY_EVENT: {:?}, mode={:?}", key.code, app.mode));
                    match app.mode {
                        AppMode::ThemePicker => handle_theme_picker_input(app, key.code),
                        AppMode::ThemePrompt | AppMode::ColorPrompt => {
                            handle_prompt_input(app, key.code)
                        }
                        AppMode::Typing => {
                            if !handle_keybinding(app, key.modifiers, key.code) {
                                handle_typing_input(app, key.modifiers, key.code);
                            }
                        }
                    }
                }
                // Layout is recomputed on every draw
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
