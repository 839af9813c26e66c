//! Loading assignment rows from comma-separated text.
//!
//! The expected row layout is `employee_id, project_id, date_from, date_to`.
//! An optional header row may precede the data, and an empty or `NULL` end
//! date marks an assignment that is still ongoing.

use chrono::NaiveDate;

use crate::assignment::{Assignment, EmployeeId, ProjectId};
use crate::date::parse_date;
use crate::error::{AnalysisError, Result};

/// Tokens recognized while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// First field of the header row, compared case-insensitively.
    pub header_token: String,

    /// End-date value meaning "still ongoing", compared case-insensitively.
    pub open_end_token: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            header_token: "empId".to_string(),
            open_end_token: "NULL".to_string(),
        }
    }
}

/// Turns raw text lines into [`Assignment`]s.
#[derive(Debug, Clone, Default)]
pub struct RecordLoader {
    options: LoaderOptions,
}

impl RecordLoader {
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    pub const fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Loads every data row, failing on the first bad one.
    ///
    /// `today` replaces open-ended end dates. Line numbers in errors are
    /// 1-based and count blank lines.
    pub fn load<I, S>(&self, lines: I, today: NaiveDate) -> Result<Vec<Assignment>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut assignments = Vec::new();
        let mut seen_row = false;

        for (idx, line) in lines.into_iter().enumerate() {
            let line_number = idx + 1;
            let line = line.as_ref();
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let first_row = !seen_row;
            seen_row = true;
            if first_row && self.is_header(trimmed) {
                tracing::debug!(line = line_number, "skipping header row");
                continue;
            }

            assignments.push(self.parse_row(line, line_number, today)?);
        }

        tracing::debug!(count = assignments.len(), "loaded assignments");
        Ok(assignments)
    }

    fn is_header(&self, row: &str) -> bool {
        row.split(',')
            .next()
            .is_some_and(|field| field.trim().eq_ignore_ascii_case(&self.options.header_token))
    }

    fn parse_row(&self, line: &str, line_number: usize, today: NaiveDate) -> Result<Assignment> {
        let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        let [employee, project, from, to] = fields.as_slice() else {
            return Err(AnalysisError::MalformedRow {
                line_number,
                content: line.to_string(),
            });
        };

        let employee_id: EmployeeId = parse_id(employee, line_number)?;
        let project_id: ProjectId = parse_id(project, line_number)?;
        let date_from = parse_date(from)?;
        let date_to = if to.is_empty() || to.eq_ignore_ascii_case(&self.options.open_end_token) {
            today
        } else {
            parse_date(to)?
        };

        Ok(Assignment::new(employee_id, project_id, date_from, date_to))
    }
}

fn parse_id(field: &str, line_number: usize) -> Result<i64> {
    field
        .parse()
        .map_err(|source| AnalysisError::InvalidInteger {
            line_number,
            value: field.to_string(),
            source,
        })
}

/// Loads rows with the default header and open-end tokens.
pub fn load_records<I, S>(lines: I, today: NaiveDate) -> Result<Vec<Assignment>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RecordLoader::default().load(lines, today)
}
