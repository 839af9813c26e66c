//! Core domain logic for the collaboration analyzer.
//!
//! This crate contains the fundamental types and logic for:
//! - Date parsing: accepting the handful of layouts found in exported sheets
//! - Loading: turning CSV-like rows into validated assignments
//! - Aggregation: finding the employee pair with the most shared days
//! - Reporting: a deterministic, serializable view of the winning pair
//!
//! Everything here is pure and synchronous; reading files and picking the
//! current date are left to the caller.

mod assignment;
pub mod date;
mod error;
pub mod loader;
pub mod overlap;
pub mod report;

use chrono::NaiveDate;

pub use assignment::{Assignment, EmployeeId, EmployeePair, ProjectId};
pub use date::parse_date;
pub use error::{AnalysisError, Result};
pub use loader::{LoaderOptions, RecordLoader, load_records};
pub use overlap::{AggregationResult, PairLedger, PairTotal, aggregate, overlap_days, tally};
pub use report::{Report, ReportRow, project};

/// A finished analysis run: the report plus the ledger it was chosen from.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: Report,
    pub ledger: PairLedger,
}

impl Analysis {
    /// Loads, aggregates and projects one input.
    ///
    /// Fails with [`AnalysisError::NoData`] when nothing was loaded or when no
    /// two different employees share a project.
    pub fn run<I, S>(loader: &RecordLoader, lines: I, today: NaiveDate) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let assignments = loader.load(lines, today)?;
        if assignments.is_empty() {
            return Err(AnalysisError::NoData);
        }
        let ledger = tally(&assignments);
        let result = ledger.best().ok_or(AnalysisError::NoData)?;
        Ok(Self {
            report: project(&result),
            ledger,
        })
    }

    /// The `n` pairs with the largest totals.
    pub fn top_pairs(&self, n: usize) -> Vec<&PairTotal> {
        let mut ranked = self.ledger.ranked();
        ranked.truncate(n);
        ranked
    }
}

/// Runs a full analysis over raw lines with the default loader options.
pub fn analyze<I, S>(lines: I, today: NaiveDate) -> Result<Report>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    analyze_with(&RecordLoader::default(), lines, today)
}

/// Runs a full analysis with a configured loader.
pub fn analyze_with<I, S>(loader: &RecordLoader, lines: I, today: NaiveDate) -> Result<Report>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Analysis::run(loader, lines, today).map(|analysis| analysis.report)
}
