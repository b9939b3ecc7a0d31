//! Trace of requests, stale drops and theme changes
//!
//! Debug builds append to `debug.log` in the working directory, or to the file
//! named by `KEYSMITH_LOG`. Release builds keep the same functions and write
//! nothing.

use crate::debounce::Generation;
use crate::theme::KeyboardTheme;
use std::fmt;
#[cfg(debug_assertions)]
use std::fs::{File, OpenOptions};
#[cfg(debug_assertions)]
use std::io::Write;
#[cfg(debug_assertions)]
use std::sync::Mutex;

/// Environment variable overriding the trace file location
pub const LOG_PATH_ENV: &str = "KEYSMITH_LOG";

#[cfg(debug_assertions)]
const DEFAULT_LOG_PATH: &str = "debug.log";

/// Payloads are clipped to this many characters
const MAX_PAYLOAD_CHARS: usize = 80;

#[cfg(debug_assertions)]
static TRACE_FILE: Mutex<Option<File>> = Mutex::new(None);

/// Background call a trace line belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    /// Prediction refresh tagged with its generation
    Predict(Generation),
    Assist,
    Theme,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Predict(generation) => write!(f, "predict#{generation}"),
            RequestKind::Assist => write!(f, "assist"),
            RequestKind::Theme => write!(f, "theme"),
        }
    }
}

/// Open the trace file (debug builds only)
#[cfg(debug_assertions)]
pub fn init() {
    let path = std::env::var(LOG_PATH_ENV).unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());
    let Ok(mut guard) = TRACE_FILE.lock() else {
        return;
    };
    if guard.is_some() {
        return;
    }
    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
        *guard = Some(file);
        drop(guard);
        log(&format!("=== keysmith {} trace ===", env!("CARGO_PKG_VERSION")));
    }
}

#[cfg(not(debug_assertions))]
pub fn init() {}

/// Append one timestamped line
#[cfg(debug_assertions)]
pub fn log(message: &str) {
    let Ok(mut guard) = TRACE_FILE.lock() else {
        return;
    };
    if let Some(file) = guard.as_mut() {
        let stamp = chrono::Local::now().format("%H:%M:%S%.3f");
        let _ = writeln!(file, "[{stamp}] {message}");
        let _ = file.flush();
    }
}

#[cfg(not(debug_assertions))]
pub fn log(_message: &str) {}

pub fn log_category(category: &str, message: &str) {
    log(&format!("[{category}] {message}"));
}

/// A request leaving for the assistant, with its clipped payload
pub fn log_dispatch(kind: RequestKind, payload: &str) {
    log(&request_line(kind, "dispatch", &clip(payload)));
}

/// A request coming back, or falling back
pub fn log_outcome(kind: RequestKind, outcome: &str) {
    log(&request_line(kind, outcome, ""));
}

/// Predictions discarded because a newer edit superseded them
pub fn log_stale(generation: Generation, current: Generation) {
    log(&request_line(
        RequestKind::Predict(generation),
        "stale",
        &format!("current #{current}"),
    ));
}

/// Active theme after `operation`
pub fn log_theme(operation: &str, theme: &KeyboardTheme) {
    log(&theme_line(operation, theme));
}

fn request_line(kind: RequestKind, event: &str, detail: &str) -> String {
    if detail.is_empty() {
        format!("[REQUEST:{kind}] {event}")
    } else {
        format!("[REQUEST:{kind}] {event} | {detail}")
    }
}

fn theme_line(operation: &str, theme: &KeyboardTheme) -> String {
    let origin = if theme.is_customized() {
        format!("{}*", theme.id)
    } else {
        theme.id.to_string()
    };
    format!(
        "[THEME] {operation} {} ({origin}) bg={} radius={}px",
        theme.name,
        theme.background,
        theme.corner_radius.px()
    )
}

fn clip(text: &str) -> String {
    let flat = text.replace('\n', "\\n");
    if flat.chars().count() > MAX_PAYLOAD_CHARS {
        format!("{}...", flat.chars().take(MAX_PAYLOAD_CHARS).collect::<String>())
    } else {
        flat
    }
}
