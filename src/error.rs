//! Error taxonomy shared by every subcommand.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed user input. `usage` lines are shown after the message.
    #[error("{message}")]
    Validation { message: String, usage: Vec<String> },

    #[error("Base date file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Daily directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("{context} {}: {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{name} is not installed. Please install it first:")]
    MissingDependency { name: String, hint: String },

    /// Wraps whatever stopped the next-day rollover.
    #[error("Failed to create next day note: {0}")]
    NextDay(#[source] Box<AppError>),

    /// An OS utility could not be spawned or exited unsuccessfully.
    #[error("{command} failed: {message}")]
    Command { command: String, message: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>, usage: &[&str]) -> Self {
        AppError::Validation {
            message: message.into(),
            usage: usage.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        AppError::Io {
            context,
            path: path.into(),
            source,
        }
    }

    /// Follow-up lines printed at info level after the error itself.
    pub fn hints(&self) -> Vec<String> {
        match self {
            AppError::Validation { usage, .. } => usage.clone(),
            AppError::MissingDependency { hint, .. } => vec![format!("  {}", hint)],
            AppError::NextDay(inner) => inner.hints(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_path() {
        let e = AppError::NotFound(PathBuf::from("/vault/daily/2025-10-12.md"));
        assert_eq!(
            e.to_string(),
            "Base date file not found: /vault/daily/2025-10-12.md"
        );
        assert!(e.hints().is_empty());
    }

    #[test]
    fn test_io_includes_cause() {
        let source = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let e = AppError::io("Failed to write", "/vault/daily/x.md", source);
        let msg = e.to_string();
        assert!(msg.starts_with("Failed to write /vault/daily/x.md"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_validation_hints_are_usage_lines() {
        let e = AppError::validation("Date option is required", &["Usage: a", "Example: b"]);
        assert_eq!(e.to_string(), "Date option is required");
        assert_eq!(e.hints(), vec!["Usage: a".to_string(), "Example: b".to_string()]);
    }

    #[test]
    fn test_next_day_wraps_cause() {
        let e = AppError::NextDay(Box::new(AppError::DirectoryNotFound(PathBuf::from("/v/daily"))));
        assert_eq!(
            e.to_string(),
            "Failed to create next day note: Daily directory not found: /v/daily"
        );
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn test_missing_dependency_hint_is_indented() {
        let e = AppError::MissingDependency {
            name: "sleepwatcher".to_string(),
            hint: "brew install sleepwatcher".to_string(),
        };
        assert!(e.to_string().starts_with("sleepwatcher is not installed"));
        assert_eq!(e.hints(), vec!["  brew install sleepwatcher".to_string()]);
    }
}
