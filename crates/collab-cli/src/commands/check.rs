//! Check command for validating input files without analyzing them.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use collab_core::RecordLoader;

use super::util::read_input;
use crate::Config;

/// Loads one file and returns the number of assignments in it.
pub fn check_file(path: &Path, loader: &RecordLoader, today: NaiveDate) -> Result<usize> {
    let contents = read_input(path)?;
    let assignments = loader
        .load(contents.lines(), today)
        .with_context(|| format!("invalid input in {}", path.display()))?;
    Ok(assignments.len())
}

pub fn run<W: Write>(
    writer: &mut W,
    files: &[PathBuf],
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    let loader = config.loader();
    let mut failed = 0;

    for path in files {
        match check_file(path, &loader, today) {
            Ok(count) => {
                let noun = if count == 1 { "assignment" } else { "assignments" };
                writeln!(writer, "{}: {count} {noun}", path.display())?;
            }
            Err(e) => {
                eprintln!("Error: {e:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} file(s) failed validation", files.len());
    }
    Ok(())
}
