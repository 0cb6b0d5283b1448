//! Runtime configuration resolved once at startup.

use std::env;
use std::path::{Path, PathBuf};

/// LaunchAgent label; also names the plist and its log files.
pub const LAUNCH_AGENT_LABEL: &str = "com.user.obsidian-manager";

/// Environment variable naming the default Obsidian vault.
pub const VAULT_PATH_ENV: &str = "OBSIDIAN_VAULT_PATH";

const SLEEPWATCHER_PATH: &str = "/usr/local/sbin/sleepwatcher";

#[derive(Clone, Debug)]
pub struct Config {
    pub label: String,
    /// `~/Library/LaunchAgents/<label>.plist`
    pub plist_path: PathBuf,
    /// Directory for the agent's stdout/stderr logs.
    pub log_dir: PathBuf,
    pub vault_path: Option<PathBuf>,
    pub sleepwatcher_path: PathBuf,
    /// This binary; the agent invokes it with `stop` on sleep and `start` on wake.
    pub cli_path: PathBuf,
}

impl Config {
    /// Builds the configuration from `HOME`, `OBSIDIAN_VAULT_PATH` and the running executable.
    pub fn from_env() -> Self {
        let home = home_dir();
        let vault_path = env::var_os(VAULT_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let cli_path = env::current_exe().unwrap_or_else(|_| PathBuf::from("obsidian-manager"));
        Self::with_home(&home, vault_path, cli_path)
    }

    pub fn with_home(home: &Path, vault_path: Option<PathBuf>, cli_path: PathBuf) -> Self {
        let label = LAUNCH_AGENT_LABEL.to_string();
        let plist_path = home
            .join("Library")
            .join("LaunchAgents")
            .join(format!("{}.plist", label));
        Config {
            label,
            plist_path,
            log_dir: home.join("Library").join("Logs"),
            vault_path,
            sleepwatcher_path: PathBuf::from(SLEEPWATCHER_PATH),
            cli_path,
        }
    }

    pub fn stdout_log_path(&self) -> PathBuf {
        self.log_dir.join(format!("{}.stdout.log", self.label))
    }

    pub fn stderr_log_path(&self) -> PathBuf {
        self.log_dir.join(format!("{}.stderr.log", self.label))
    }
}

/// `$HOME`, or `.` if unset.
fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_home_layout() {
        let cfg = Config::with_home(
            Path::new("/Users/me"),
            Some(PathBuf::from("/vault")),
            PathBuf::from("/opt/bin/obsidian-manager"),
        );
        assert_eq!(cfg.label, "com.user.obsidian-manager");
        assert_eq!(
            cfg.plist_path,
            PathBuf::from("/Users/me/Library/LaunchAgents/com.user.obsidian-manager.plist")
        );
        assert_eq!(
            cfg.stdout_log_path(),
            PathBuf::from("/Users/me/Library/Logs/com.user.obsidian-manager.stdout.log")
        );
        assert_eq!(
            cfg.stderr_log_path(),
            PathBuf::from("/Users/me/Library/Logs/com.user.obsidian-manager.stderr.log")
        );
        assert_eq!(cfg.vault_path, Some(PathBuf::from("/vault")));
        assert_eq!(cfg.sleepwatcher_path, PathBuf::from("/usr/local/sbin/sleepwatcher"));
    }

    #[test]
    fn test_from_env_plist_under_home() {
        let cfg = Config::from_env();
        assert!(cfg.plist_path.ends_with("Library/LaunchAgents/com.user.obsidian-manager.plist"));
    }
}
