//! Diagnostic narration for the subcommands.
//!
//! Commands talk to a [`Logger`] rather than to `tracing` directly so tests can
//! swap in [`RecordingLogger`] and assert on what was reported.

use tracing_subscriber::EnvFilter;

pub trait Logger {
    fn trace(&self, message: &str);
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn fatal(&self, message: &str);
}

/// Forwards every call to the matching `tracing` macro.
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn trace(&self, message: &str) {
        tracing::trace!("{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    // tracing has no level above ERROR.
    fn fatal(&self, message: &str) {
        tracing::error!(fatal = true, "{}", message);
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides `debug`.
///
/// At info level only the level and message are printed; debug output also
/// carries timestamps and targets.
pub fn init(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if debug {
        builder.try_init()
    } else {
        builder.without_time().with_target(false).try_init()
    };
    if let Err(e) = result {
        eprintln!("obsidian-manager: logger already initialised: {}", e);
    }
}

#[cfg(test)]
pub use recording::{Level, RecordingLogger};

#[cfg(test)]
mod recording {
    use super::Logger;
    use std::cell::RefCell;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Level {
        Trace,
        Debug,
        Info,
        Warn,
        Error,
        Fatal,
    }

    #[derive(Default)]
    pub struct RecordingLogger {
        entries: RefCell<Vec<(Level, String)>>,
    }

    impl RecordingLogger {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn entries(&self) -> Vec<(Level, String)> {
            self.entries.borrow().clone()
        }

        /// True if some message at `level` contains `needle`.
        pub fn contains(&self, level: Level, needle: &str) -> bool {
            self.entries
                .borrow()
                .iter()
                .any(|(l, m)| *l == level && m.contains(needle))
        }

        fn push(&self, level: Level, message: &str) {
            self.entries.borrow_mut().push((level, message.to_string()));
        }
    }

    impl Logger for RecordingLogger {
        fn trace(&self, message: &str) {
            self.push(Level::Trace, message);
        }
        fn debug(&self, message: &str) {
            self.push(Level::Debug, message);
        }
        fn info(&self, message: &str) {
            self.push(Level::Info, message);
        }
        fn warn(&self, message: &str) {
            self.push(Level::Warn, message);
        }
        fn error(&self, message: &str) {
            self.push(Level::Error, message);
        }
        fn fatal(&self, message: &str) {
            self.push(Level::Fatal, message);
        }
    }
}
