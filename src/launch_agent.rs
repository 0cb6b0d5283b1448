//! LaunchAgent plist rendering and the `launchctl` calls that load it.
//!
//! The agent runs `sleepwatcher`, which calls back into this binary with `stop`
//! when the machine sleeps and `start` when it wakes.

use std::path::Path;
use std::process::Command;

use crate::config::Config;
use crate::error::AppError;

/// PATH handed to the agent so `open`, `pkill` and Homebrew tools resolve.
const AGENT_PATH: &str = "/usr/local/bin:/usr/bin:/bin:/usr/sbin:/sbin:/opt/homebrew/bin";

/// Loading, unloading and listing launch agents.
pub trait ServiceManager {
    fn load(&self, plist: &Path) -> Result<(), AppError>;
    fn unload(&self, plist: &Path) -> Result<(), AppError>;
    /// Raw `launchctl list` output.
    fn list(&self) -> Result<String, AppError>;
}

/// [`ServiceManager`] backed by `/bin/launchctl`.
pub struct Launchctl;

impl Launchctl {
    fn run(&self, args: &[&str]) -> Result<String, AppError> {
        let command = format!("launchctl {}", args.join(" "));
        let output = Command::new("launchctl")
            .args(args)
            .output()
            .map_err(|e| AppError::Command {
                command: command.clone(),
                message: e.to_string(),
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            return Err(AppError::Command { command, message });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ServiceManager for Launchctl {
    fn load(&self, plist: &Path) -> Result<(), AppError> {
        let path = plist.to_string_lossy().into_owned();
        self.run(&["load", path.as_str()]).map(|_| ())
    }

    fn unload(&self, plist: &Path) -> Result<(), AppError> {
        let path = plist.to_string_lossy().into_owned();
        self.run(&["unload", path.as_str()]).map(|_| ())
    }

    fn list(&self) -> Result<String, AppError> {
        self.run(&["list"])
    }
}

/// Lines of `launchctl list` output that mention `label`.
pub fn matching_lines<'a>(listing: &'a str, label: &str) -> Vec<&'a str> {
    listing.lines().filter(|l| l.contains(label)).collect()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders the LaunchAgent plist that keeps sleepwatcher running with our sleep/wake scripts.
pub fn generate_plist(config: &Config, sleep_script: &str, wake_script: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{label}</string>
    <key>ProgramArguments</key>
    <array>
        <string>{sleepwatcher}</string>
        <string>-V</string>
        <string>-s</string>
        <string>{sleep}</string>
        <string>-w</string>
        <string>{wake}</string>
    </array>
    <key>EnvironmentVariables</key>
    <dict>
        <key>PATH</key>
        <string>{path}</string>
    </dict>
    <key>RunAtLoad</key>
    <true/>
    <key>KeepAlive</key>
    <true/>
    <key>StandardOutPath</key>
    <string>{stdout}</string>
    <key>StandardErrorPath</key>
    <string>{stderr}</string>
</dict>
</plist>"#,
        label = escape_xml(&config.label),
        sleepwatcher = escape_xml(&config.sleepwatcher_path.to_string_lossy()),
        sleep = escape_xml(sleep_script),
        wake = escape_xml(wake_script),
        path = AGENT_PATH,
        stdout = escape_xml(&config.stdout_log_path().to_string_lossy()),
        stderr = escape_xml(&config.stderr_log_path().to_string_lossy()),
    )
}

#[cfg(test)]
pub use fake::FakeServiceManager;
