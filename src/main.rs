//! # obsidian-manager — keep Obsidian in step with sleep/wake, roll daily notes forward
//!
//! A LaunchAgent runs `sleepwatcher`, which calls this binary with `stop` when the
//! Mac sleeps and `start` when it wakes. `next-day` copies the unfinished TODOs of a
//! daily note into a fresh note for the following day.
//!
//! ## Daily note layout
//!
//! Notes live at `<vault>/daily/YYYY-MM-DD.md` with three sections:
//!
//! - `## timeline`
//! - `## TODO（短期）` (short term)
//! - `## TODO（長期）` (long term)
//!
//! Only `- [ ] text` items from the two TODO sections are carried over; any other
//! mark in the brackets counts as done.
//!
//! ## Subcommands
//!
//! | Command     | Description |
//! |-------------|-------------|
//! | `install`   | Write and load the LaunchAgent plist (requires sleepwatcher). |
//! | `uninstall` | Unload and remove the LaunchAgent plist. |
//! | `status`    | Show whether the plist is installed and loaded. |
//! | `start`     | Open `/Applications/Obsidian.app`. |
//! | `stop`      | Quit Obsidian (`pkill -x Obsidian`); never fails. |
//! | `next-day`  | Create tomorrow's daily note; an existing note is left untouched. |
//!
//! Every failure exits with status 1; success (including an existing next-day note) exits 0.

mod commands;
mod config;
mod daily_note;
mod date;
mod error;
mod launch_agent;
mod logger;
mod markdown;
mod obsidian;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
#[cfg(unix)]
use libc::{signal, SIGPIPE, SIG_IGN};

use crate::config::Config;
use crate::error::AppError;
use crate::launch_agent::Launchctl;
use crate::logger::{Logger, TracingLogger};
use crate::obsidian::ObsidianApp;

#[derive(Parser, Debug)]
#[command(
    name = "obsidian-manager",
    version,
    about = "Manage Obsidian app with sleep/wake events"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install LaunchAgent to manage Obsidian on sleep/wake
    Install,
    /// Uninstall LaunchAgent
    Uninstall,
    /// Check LaunchAgent status
    Status,
    /// Manually start Obsidian
    Start,
    /// Manually stop Obsidian
    Stop,
    /// Create next day daily note with TODOs from previous day
    NextDay {
        /// Base date (required)
        #[arg(short, long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
        /// Obsidian vault path (required unless OBSIDIAN_VAULT_PATH is set)
        #[arg(short, long, value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

fn run(command: Commands, logger: &dyn Logger, config: &Config) -> Result<(), AppError> {
    match command {
        Commands::Install => commands::cmd_install(logger, config, &Launchctl),
        Commands::Uninstall => commands::cmd_uninstall(logger, config, &Launchctl),
        Commands::Status => commands::cmd_status(logger, config, &Launchctl),
        Commands::Start => commands::cmd_start(logger, &ObsidianApp),
        Commands::Stop => commands::cmd_stop(logger, &ObsidianApp),
        Commands::NextDay { date, path } => {
            commands::cmd_next_day(logger, config, date.as_deref(), path.as_deref())
        }
    }
}

/// Logs a failure and its hints; returns the process exit status.
fn report(result: Result<(), AppError>, logger: &dyn Logger) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            logger.error(&e.to_string());
            for hint in e.hints() {
                logger.info(&hint);
            }
            1
        }
    }
}

fn main() {
    #[cfg(unix)]
    unsafe {
        signal(SIGPIPE, SIG_IGN);
    }
    let cli = Cli::parse();
    logger::init(cli.debug);
    let logger = TracingLogger;
    let config = Config::from_env();
    logger.trace(&format!("config: {:?}", config));

    let code = report(run(cli.command, &logger, &config), &logger);
    process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{Level, RecordingLogger};
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_next_day_flags() {
        let cli = Cli::try_parse_from([
            "obsidian-manager",
            "next-day",
            "--date",
            "2025-10-12",
            "-p",
            "/vault",
        ])
        .unwrap();
        match cli.command {
            Commands::NextDay { date, path } => {
                assert_eq!(date.as_deref(), Some("2025-10-12"));
                assert_eq!(path.as_deref(), Some(Path::new("/vault")));
            }
            other => panic!("expected next-day, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_next_day_without_flags_reaches_validation() {
        let cli = Cli::try_parse_from(["obsidian-manager", "next-day"]).unwrap();
        assert!(matches!(cli.command, Commands::NextDay { date: None, path: None }));
    }

    #[test]
    fn test_parse_global_debug_after_subcommand() {
        let cli = Cli::try_parse_from(["obsidian-manager", "status", "--debug"]).unwrap();
        assert!(cli.debug);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_parse_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["obsidian-manager", "restart"]).is_err());
    }

    #[test]
    fn test_report_success_is_zero() {
        let logger = RecordingLogger::new();
        assert_eq!(report(Ok(()), &logger), 0);
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn test_report_validation_logs_error_then_usage() {
        let logger = RecordingLogger::new();
        let err = AppError::validation("Date option is required", &["Usage: x"]);
        assert_eq!(report(Err(err), &logger), 1);
        assert_eq!(
            logger.entries(),
            vec![
                (Level::Error, "Date option is required".to_string()),
                (Level::Info, "Usage: x".to_string()),
            ]
        );
    }

    #[test]
    fn test_run_next_day_validation_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_home(dir.path(), None, PathBuf::from("obsidian-manager"));
        let logger = RecordingLogger::new();
        let command = Commands::NextDay {
            date: Some("2025-10-12".to_string()),
            path: None,
        };
        assert_eq!(report(run(command, &logger, &config), &logger), 1);
        assert!(logger.contains(Level::Error, "vault path option is required"));
    }

    #[test]
    fn test_run_next_day_already_exists_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let daily = dir.path().join("daily");
        std::fs::create_dir(&daily).unwrap();
        std::fs::write(daily.join("2025-10-12.md"), "## TODO（短期）\n- [ ] a").unwrap();
        std::fs::write(daily.join("2025-10-13.md"), "kept").unwrap();
        let config = Config::with_home(dir.path(), None, PathBuf::from("obsidian-manager"));
        let logger = RecordingLogger::new();
        let command = Commands::NextDay {
            date: Some("2025-10-12".to_string()),
            path: Some(dir.path().to_path_buf()),
        };
        assert_eq!(report(run(command, &logger, &config), &logger), 0);
        assert_eq!(std::fs::read_to_string(daily.join("2025-10-13.md")).unwrap(), "kept");
    }
}
