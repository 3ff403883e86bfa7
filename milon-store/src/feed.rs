//! Source row feed.
//!
//! The feed is a comma-delimited file with a header row naming `English`,
//! `Hebrew`, and `Pixabay_Search` columns (case-insensitive, any order).
//! The engine only ever reads it. Quoted fields may contain commas and
//! doubled quotes.

use milon_core::model::ImportRow;
use milon_core::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Load import rows from the feed file. A missing file means manual entry
/// only and yields an empty list. Rows without an English term are dropped.
pub fn load_import_rows(path: &Path) -> Result<Vec<ImportRow>> {
    if !path.exists() {
        debug!("Import feed {} not found", path.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut lines = content.lines();
    let header = match lines.next() {
        Some(line) => split_row(line),
        None => return Ok(Vec::new()),
    };

    let english_col = find_column(&header, "english");
    let hebrew_col = find_column(&header, "hebrew");
    let query_col = find_column(&header, "pixabay_search");

    let english_col = match english_col {
        Some(idx) => idx,
        None => {
            warn!("Import feed {} has no English column", path.display());
            return Ok(Vec::new());
        }
    };

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_row(line);
        let english = field(&fields, Some(english_col));
        if english.is_empty() {
            continue;
        }
        rows.push(ImportRow::new(
            english,
            field(&fields, hebrew_col),
            field(&fields, query_col),
        ));
    }

    debug!("Loaded {} import rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn find_column(header: &[String], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|col| col.trim().eq_ignore_ascii_case(name))
}

fn field(fields: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| fields.get(i))
        .map(|f| f.trim().to_string())
        .unwrap_or_default()
}

/// Split one delimited line into fields. Handles quoted fields with embedded
/// commas and `""` escapes.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
