//! Background requests to the assistant
//!
//! Each call runs on its own thread and reports back over a channel that the
//! UI loop drains every frame. All mutable state stays on the UI thread.

use crate::debounce::Generation;
use crate::debug::{self, RequestKind};
use crate::gemini::{ASSIST_FALLBACK, Assistant, FALLBACK_PREDICTIONS};
use crate::theme::ThemePatch;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::time::Duration;

/// A finished background request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Next-word predictions for the refresh tagged `generation`
    Predictions {
        generation: Generation,
        words: Vec<String>,
    },
    /// Rewritten text from the assist call
    Assist(String),
    /// Generated palette, or `None` when generation failed
    Theme(Option<ThemePatch>),
}

impl Reply {
    fn kind(&self) -> RequestKind {
        match self {
            Reply::Predictions { generation, .. } => RequestKind::Predict(*generation),
            Reply::Assist(_) => RequestKind::Assist,
            Reply::Theme(_) => RequestKind::Theme,
        }
    }
}

pub struct RequestWorker {
    assistant: Arc<dyn Assistant>,
    tx: Sender<Reply>,
    rx: Receiver<Reply>,
}

impl RequestWorker {
    pub fn new(assistant: Arc<dyn Assistant>) -> Self {
        let (tx, rx) = channel();
        Self { assistant, tx, rx }
    }

    /// Fetch predictions for `context`, tagging the reply with `generation`
    pub fn predict(&self, generation: Generation, context: String) {
        debug::log_dispatch(RequestKind::Predict(generation), &context);
        let fallback = Reply::Predictions {
            generation,
            words: FALLBACK_PREDICTIONS.iter().map(|w| w.to_string()).collect(),
        };
        self.spawn(fallback, move |assistant| Reply::Predictions {
            generation,
            words: assistant.predict_next_words(&context),
        });
    }

    /// Ask the assistant to improve `text`
    pub fn assist(&self, text: String) {
        debug::log_dispatch(RequestKind::Assist, &text);
        self.spawn(Reply::Assist(ASSIST_FALLBACK.to_string()), move |assistant| {
            Reply::Assist(assistant.assist_text(&text))
        });
    }

    /// Generate a palette from a description
    pub fn generate_theme(&self, prompt: String) {
        debug::log_dispatch(RequestKind::Theme, &prompt);
        self.spawn(Reply::Theme(None), move |assistant| {
            Reply::Theme(assistant.generate_theme(&prompt))
        });
    }

    /// Next finished reply, if any
    pub fn try_recv(&self) -> Option<Reply> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next reply
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Reply> {
        match self.rx.recv_timeout(timeout) {
            Ok(reply) => Some(reply),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    fn spawn<F>(&self, fallback: Reply, request: F)
    where
        F: FnOnce(&dyn Assistant) -> Reply + Send + 'static,
    {
        let assistant = Arc::clone(&self.assistant);
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            // A panicking assistant still answers, so loading indicators clear
            let reply = catch_unwind(AssertUnwindSafe(|| request(assistant.as_ref())))
                .unwrap_or_else(|_| {
                    debug::log_outcome(fallback.kind(), "panicked, using fallback");
                    fallback
                });
            debug::log_outcome(reply.kind(), "done");
            // The receiver is gone only when the session was dropped
            let _ = tx.send(reply);
        });
    }
}
