//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::Context;
use chrono::{Local, NaiveDate};

/// Reads an input file as text, dropping a leading UTF-8 byte order mark.
///
/// Spreadsheet exports frequently start with a BOM, which would otherwise
/// end up glued to the header token.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!(path = ?path, bytes = contents.len(), "read input file");
    Ok(match contents.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => contents,
    })
}

/// The date that stands in for open-ended assignments.
pub fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}
