// src/progress.rs
use std::io::{self, Write};

/// Status reporting for the slow parts of a command (fetching, parsing).
/// The CLI shows it on stderr; library callers and tests pass `NullProgress`.
pub trait Progress {
    /// A new phase starts, e.g. "Fetching...".
    fn begin(&mut self, _phase: &str) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    fn succeed(&mut self, _msg: &str) {}

    fn fail(&mut self, _msg: &str) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Plain status lines on stderr so stdout stays clean for results.
pub struct ConsoleProgress {
    quiet: bool,
}

impl ConsoleProgress {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn line(&self, prefix: &str, msg: &str) {
        if self.quiet {
            return;
        }
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{prefix} {msg}");
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, phase: &str) {
        log::debug!("{phase}");
        self.line("..", phase);
    }

    fn log(&mut self, msg: &str) {
        log::info!("{msg}");
        self.line("  ", msg);
    }

    fn succeed(&mut self, msg: &str) {
        self.line("ok", msg);
    }

    fn fail(&mut self, msg: &str) {
        log::warn!("{msg}");
        self.line("!!", msg);
    }
}

/// Records every call; handy in tests.
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Vec<String>,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, phase: &str) {
        self.events.push(format!("begin:{phase}"));
    }
    fn log(&mut self, msg: &str) {
        self.events.push(format!("log:{msg}"));
    }
    fn succeed(&mut self, msg: &str) {
        self.events.push(format!("succeed:{msg}"));
    }
    fn fail(&mut self, msg: &str) {
        self.events.push(format!("fail:{msg}"));
    }
}
