//! Daily note rollover: carry unfinished TODOs from one day's note into the next.
//!
//! Notes live at `<vault>/daily/YYYY-MM-DD.md` and are made of three sections,
//! matched by exact heading text (see the `*_HEADING` constants).

use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::date::{format_date, next_day};
use crate::error::AppError;
use crate::logger::Logger;
use crate::markdown::{build_section, extract_section, filter_incomplete};

/// Subdirectory of the vault holding daily notes.
const DAILY_DIR: &str = "daily";

pub const TIMELINE_HEADING: &str = "## timeline";
pub const SHORT_TERM_HEADING: &str = "## TODO（短期）";
pub const LONG_TERM_HEADING: &str = "## TODO（長期）";

/// Unfinished checklist lines taken from a note's two TODO sections.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TodoSections {
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

/// How a successful rollover ended.
#[derive(Debug, PartialEq, Eq)]
pub enum NextDayOutcome {
    /// A new note was written at this path.
    Created(PathBuf),
    /// The next day's note was already there and was left untouched.
    AlreadyExists(PathBuf),
}

/// `<base_dir>/daily/YYYY-MM-DD.md`
pub fn daily_note_path(date: NaiveDate, base_dir: &Path) -> PathBuf {
    base_dir
        .join(DAILY_DIR)
        .join(format!("{}.md", format_date(date)))
}

/// Unfinished items from both TODO sections of `content`. Missing sections yield no items.
pub fn extract_todo_sections(content: &str) -> TodoSections {
    let pick = |heading: &str| -> Vec<String> {
        filter_incomplete(&extract_section(content, heading))
            .into_iter()
            .map(str::to_string)
            .collect()
    };
    TodoSections {
        short_term: pick(SHORT_TERM_HEADING),
        long_term: pick(LONG_TERM_HEADING),
    }
}

/// Renders a fresh note: empty timeline, then the short- and long-term sections.
pub fn generate_daily_note_content(todos: &TodoSections) -> String {
    let sections = [
        format!("{}\n\n", TIMELINE_HEADING),
        build_section(SHORT_TERM_HEADING, &todos.short_term),
        build_section(LONG_TERM_HEADING, &todos.long_term),
    ];
    sections.join("\n")
}

/// Creates the note for the day after `base_date`, carrying over unfinished TODOs.
///
/// Never overwrites: if the next day's note exists the result is
/// [`NextDayOutcome::AlreadyExists`] and nothing is written. The `daily`
/// directory must already exist.
pub fn create_next_day_note(
    logger: &dyn Logger,
    base_date: NaiveDate,
    base_dir: &Path,
) -> Result<NextDayOutcome, AppError> {
    let base_path = daily_note_path(base_date, base_dir);
    if !base_path.is_file() {
        return Err(AppError::NotFound(base_path));
    }

    let next_date = next_day(base_date).ok_or_else(|| {
        AppError::validation(
            format!("No day follows {}", format_date(base_date)),
            &[],
        )
    })?;
    let next_path = daily_note_path(next_date, base_dir);
    if next_path.exists() {
        return Ok(NextDayOutcome::AlreadyExists(next_path));
    }

    let content = fs::read_to_string(&base_path)
        .map_err(|e| AppError::io("Failed to read", &base_path, e))?;
    let todos = extract_todo_sections(&content);
    logger.debug(&format!(
        "Carrying over {} short-term and {} long-term TODOs from {}",
        todos.short_term.len(),
        todos.long_term.len(),
        base_path.display()
    ));
    let new_content = generate_daily_note_content(&todos);

    let outcome = write_daily_note(&next_path, &new_content)?;
    if let NextDayOutcome::Created(p) = &outcome {
        logger.trace(&format!("Wrote {}", p.display()));
    }
    Ok(outcome)
}

/// Writes a new note at `path`. The containing directory must exist; an existing
/// file is never opened for writing and yields [`NextDayOutcome::AlreadyExists`].
pub fn write_daily_note(path: &Path, content: &str) -> Result<NextDayOutcome, AppError> {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if !dir.is_dir() {
        return Err(AppError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(NextDayOutcome::AlreadyExists(path.to_path_buf()));
        }
        Err(e) => return Err(AppError::io("Failed to write", path, e)),
    };
    file.write_all(content.as_bytes())
        .map_err(|e| AppError::io("Failed to write", path, e))?;
    Ok(NextDayOutcome::Created(path.to_path_buf()))
}
