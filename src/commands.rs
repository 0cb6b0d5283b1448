//! One function per subcommand. These are the only place outcomes become
//! user-facing messages; failures are returned for `main` to report.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::daily_note::{create_next_day_note, NextDayOutcome};
use crate::date::{format_date, parse_date};
use crate::error::AppError;
use crate::launch_agent::{generate_plist, matching_lines, ServiceManager};
use crate::logger::Logger;
use crate::obsidian::AppControl;

const NEXT_DAY_DATE_USAGE: [&str; 2] = [
    "Usage: obsidian-manager next-day --date YYYY-MM-DD --path /path/to/vault",
    "Example: obsidian-manager next-day --date 2025-10-12 --path ~/Documents/Obsidian/Vault",
];

const NEXT_DAY_PATH_USAGE: [&str; 3] = [
    "Usage: obsidian-manager next-day --date YYYY-MM-DD --path /path/to/vault",
    "Example: obsidian-manager next-day --date 2025-10-12 --path ~/Documents/Obsidian/Vault",
    "The vault path may also be set with OBSIDIAN_VAULT_PATH.",
];

/// Writes the LaunchAgent plist and loads it, replacing any previous install.
pub fn cmd_install(
    logger: &dyn Logger,
    config: &Config,
    services: &dyn ServiceManager,
) -> Result<(), AppError> {
    logger.info("Installing Obsidian Manager LaunchAgent...");

    if !config.sleepwatcher_path.is_file() {
        return Err(AppError::MissingDependency {
            name: "sleepwatcher".to_string(),
            hint: "brew install sleepwatcher".to_string(),
        });
    }

    let cli_path = config.cli_path.display().to_string();
    let sleep_script = format!("{} stop", cli_path);
    let wake_script = format!("{} start", cli_path);
    let plist = generate_plist(config, &sleep_script, &wake_script);

    let plist_path = &config.plist_path;
    if let Some(agents_dir) = plist_path.parent() {
        if !agents_dir.exists() {
            fs::create_dir_all(agents_dir)
                .map_err(|e| AppError::io("Failed to create directory", agents_dir, e))?;
            logger.debug(&format!("Created directory: {}", agents_dir.display()));
        }
    }

    if plist_path.exists() {
        logger.warn("LaunchAgent already exists. Unloading first...");
        if let Err(e) = services.unload(plist_path) {
            logger.debug(&format!("Ignoring unload failure: {}", e));
        }
    }

    fs::write(plist_path, plist)
        .map_err(|e| AppError::io("Failed to write plist file", plist_path, e))?;
    logger.debug(&format!("Created plist file: {}", plist_path.display()));

    services.load(plist_path)?;
    logger.info("✓ LaunchAgent loaded successfully");

    logger.info("Installation complete!");
    logger.info(&format!("- CLI binary: {}", cli_path));
    logger.info(&format!("- Sleep script: {}", sleep_script));
    logger.info(&format!("- Wake script: {}", wake_script));
    logger.info(&format!("- Plist: {}", plist_path.display()));
    Ok(())
}

/// Unloads and removes the LaunchAgent. A missing plist is not an error.
pub fn cmd_uninstall(
    logger: &dyn Logger,
    config: &Config,
    services: &dyn ServiceManager,
) -> Result<(), AppError> {
    logger.info("Uninstalling Obsidian Manager LaunchAgent...");

    let plist_path = &config.plist_path;
    if !plist_path.exists() {
        logger.warn(&format!("LaunchAgent not found: {}", plist_path.display()));
        logger.info("Nothing to uninstall.");
        return Ok(());
    }

    match services.unload(plist_path) {
        Ok(()) => logger.debug("LaunchAgent unloaded"),
        Err(e) => logger.warn(&format!(
            "Failed to unload LaunchAgent (it may not be running): {}",
            e
        )),
    }

    fs::remove_file(plist_path)
        .map_err(|e| AppError::io("Failed to remove plist file", plist_path, e))?;
    logger.info("✓ LaunchAgent removed successfully");
    logger.info("Uninstallation complete!");
    Ok(())
}

/// Reports whether the plist is installed and whether launchd has it loaded.
pub fn cmd_status(
    logger: &dyn Logger,
    config: &Config,
    services: &dyn ServiceManager,
) -> Result<(), AppError> {
    let plist_path = &config.plist_path;
    logger.info("Checking Obsidian Manager LaunchAgent status...");
    logger.info("");

    let installed = plist_path.exists();
    logger.info(&format!(
        "Plist file: {}",
        if installed { "✓ Installed" } else { "✗ Not installed" }
    ));
    logger.info(&format!("  Path: {}", plist_path.display()));
    logger.info("");

    if !installed {
        logger.info("Run \"install\" command to set up LaunchAgent");
        return Ok(());
    }

    let running: Vec<String> = match services.list() {
        Ok(listing) => matching_lines(&listing, &config.label)
            .into_iter()
            .map(str::to_string)
            .collect(),
        Err(e) => {
            logger.debug(&format!("launchctl list: {}", e));
            Vec::new()
        }
    };

    if running.is_empty() {
        logger.info("LaunchAgent: ✗ Not running");
        logger.info("");
        logger.info("The LaunchAgent is installed but not currently running.");
        logger.info(&format!(
            "Try reloading it with: launchctl load {}",
            plist_path.display()
        ));
    } else {
        logger.info("LaunchAgent: ✓ Running");
        logger.info("");
        logger.info("Details:");
        for line in &running {
            logger.info(line.trim());
        }
    }
    Ok(())
}

pub fn cmd_start(logger: &dyn Logger, app: &dyn AppControl) -> Result<(), AppError> {
    logger.info("Starting Obsidian...");
    app.start(logger)?;
    logger.info("✓ Obsidian started");
    Ok(())
}

pub fn cmd_stop(logger: &dyn Logger, app: &dyn AppControl) -> Result<(), AppError> {
    logger.info("Stopping Obsidian...");
    app.stop(logger);
    logger.info("✓ Obsidian stopped");
    Ok(())
}

/// Creates tomorrow's daily note from `date`'s. `path` wins over the configured vault.
pub fn cmd_next_day(
    logger: &dyn Logger,
    config: &Config,
    date: Option<&str>,
    path: Option<&Path>,
) -> Result<(), AppError> {
    let date_arg = date.ok_or_else(|| {
        AppError::validation("Date option is required", &NEXT_DAY_DATE_USAGE)
    })?;
    let vault: PathBuf = path
        .map(Path::to_path_buf)
        .or_else(|| config.vault_path.clone())
        .ok_or_else(|| {
            AppError::validation("Obsidian vault path option is required", &NEXT_DAY_PATH_USAGE)
        })?;
    let base_date = parse_date(date_arg).ok_or_else(|| {
        AppError::validation(
            format!("Invalid date format: {}", date_arg),
            &["Expected format: YYYY-MM-DD (e.g., 2025-10-12)"],
        )
    })?;
    logger.debug(&format!("Using specified base date: {}", date_arg));
    logger.debug(&format!("Using vault: {}", vault.display()));

    logger.info(&format!(
        "Creating next day note based on {}...",
        format_date(base_date)
    ));
    let outcome = create_next_day_note(logger, base_date, &vault)
        .map_err(|e| AppError::NextDay(Box::new(e)))?;
    match outcome {
        NextDayOutcome::Created(p) => {
            logger.info(&format!("✓ Successfully created: {}", p.display()));
        }
        NextDayOutcome::AlreadyExists(p) => {
            logger.info(&format!("Next day file already exists: {}", p.display()));
        }
    }
    Ok(())
}
