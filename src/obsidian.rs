//! Starting and stopping the Obsidian desktop app.

use std::process::{Command, Stdio};

use crate::error::AppError;
use crate::logger::Logger;

const OBSIDIAN_APP: &str = "/Applications/Obsidian.app";
const OBSIDIAN_PROCESS: &str = "Obsidian";

pub trait AppControl {
    fn start(&self, logger: &dyn Logger) -> Result<(), AppError>;
    /// Best effort; a missing process is not an error.
    fn stop(&self, logger: &dyn Logger);
}

pub struct ObsidianApp;

impl AppControl for ObsidianApp {
    fn start(&self, logger: &dyn Logger) -> Result<(), AppError> {
        let command = format!("open {}", OBSIDIAN_APP);
        let status = Command::new("open")
            .arg(OBSIDIAN_APP)
            .status()
            .map_err(|e| AppError::Command {
                command: command.clone(),
                message: e.to_string(),
            })?;
        if !status.success() {
            return Err(AppError::Command {
                command,
                message: status.to_string(),
            });
        }
        logger.debug(&format!("Executed: {}", command));
        Ok(())
    }

    fn stop(&self, logger: &dyn Logger) {
        // pkill exits 1 when nothing matched.
        match Command::new("pkill")
            .args(["-x", OBSIDIAN_PROCESS])
            .stdin(Stdio::null())
            .status()
        {
            Ok(status) if status.success() => {
                logger.debug(&format!("Executed: pkill -x {}", OBSIDIAN_PROCESS));
            }
            Ok(status) => {
                logger.debug(&format!(
                    "pkill command completed ({}; no process may have been found)",
                    status
                ));
            }
            Err(e) => logger.debug(&format!("pkill could not be run: {}", e)),
        }
    }
}

#[cfg(test)]
pub use fake::FakeApp;
