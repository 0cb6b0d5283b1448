//! Section and checklist handling for daily-note markdown.
//!
//! Works line by line on raw text. Only `## ` style headings delimit sections and
//! only `- [X] text` lines are treated as checklist items.

use regex::Regex;
use std::sync::LazyLock;

/// Leading whitespace, a dash, one or more spaces, then one bracketed character.
static CHECKLIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s+\[(.)\]").unwrap());

/// True if the line is a checklist item, whatever its mark.
pub fn is_checklist_line(line: &str) -> bool {
    CHECKLIST_RE.is_match(line)
}

/// True if the line is a checklist item whose mark is anything but a single space.
/// Lines that are not checklist items are never complete.
pub fn is_checklist_complete(line: &str) -> bool {
    match CHECKLIST_RE.captures(line) {
        Some(caps) => &caps[1] != " ",
        None => false,
    }
}

/// Lines strictly between the first line whose trimmed text equals `heading` and the
/// next line whose trimmed text starts with `##` (or end of text). Empty if the heading
/// never appears. A leading byte-order mark is ignored.
pub fn extract_section<'a>(content: &'a str, heading: &str) -> Vec<&'a str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let heading = heading.trim();
    let mut section = Vec::new();
    let mut in_section = false;
    for line in content.split('\n') {
        let trimmed = line.trim();
        if in_section {
            if trimmed.starts_with("##") {
                break;
            }
            section.push(line);
        } else if trimmed == heading {
            in_section = true;
        }
    }
    section
}

/// Keeps unchecked checklist items in their original order.
pub fn filter_incomplete<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines
        .iter()
        .copied()
        .filter(|line| is_checklist_line(line) && !is_checklist_complete(line))
        .collect()
}

/// `heading\n` when there are no lines, else `heading\n\n` followed by the lines
/// joined with `\n` (no trailing newline).
pub fn build_section<S: AsRef<str>>(heading: &str, lines: &[S]) -> String {
    if lines.is_empty() {
        return format!("{}\n", heading);
    }
    let body: Vec<&str> = lines.iter().map(|s| s.as_ref()).collect();
    format!("{}\n\n{}", heading, body.join("\n"))
}
