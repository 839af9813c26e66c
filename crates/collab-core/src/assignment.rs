//! Assignment records and the canonical employee pair.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

pub type EmployeeId = i64;
pub type ProjectId = i64;

/// One employee's tenure on one project.
///
/// `date_from <= date_to` is not enforced; an inverted range simply never
/// overlaps with anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl Assignment {
    pub const fn new(
        employee_id: EmployeeId,
        project_id: ProjectId,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Self {
        Self {
            employee_id,
            project_id,
            date_from,
            date_to,
        }
    }
}

/// An unordered pair of two distinct employees.
///
/// Stored as `(low, high)` so `(3, 7)` and `(7, 3)` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EmployeePair {
    low: EmployeeId,
    high: EmployeeId,
}

impl EmployeePair {
    /// Builds the canonical pair, or `None` if both ids are the same employee.
    pub fn new(a: EmployeeId, b: EmployeeId) -> Option<Self> {
        if a == b {
            return None;
        }
        Some(Self {
            low: a.min(b),
            high: a.max(b),
        })
    }

    pub const fn low(&self) -> EmployeeId {
        self.low
    }

    pub const fn high(&self) -> EmployeeId {
        self.high
    }
}

impl fmt::Display for EmployeePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} & #{}", self.low, self.high)
    }
}
