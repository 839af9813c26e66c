//! Externally consumable report of the winning pair.

use serde::Serialize;

use crate::assignment::{EmployeeId, ProjectId};
use crate::overlap::AggregationResult;

/// Days one pair worked together on one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub employee_a: EmployeeId,
    pub employee_b: EmployeeId,
    pub project_id: ProjectId,
    pub days_worked: i64,
}

/// The pair that worked together the longest, with rows sorted by project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub employee_a: EmployeeId,
    pub employee_b: EmployeeId,
    pub total_days: i64,
    pub rows: Vec<ReportRow>,
}

/// Shapes an aggregation result into a [`Report`].
pub fn project(result: &AggregationResult) -> Report {
    let employee_a = result.pair.low();
    let employee_b = result.pair.high();

    // BTreeMap iteration is already ascending by project id
    let rows = result
        .per_project
        .iter()
        .map(|(&project_id, &days_worked)| ReportRow {
            employee_a,
            employee_b,
            project_id,
            days_worked,
        })
        .collect();

    Report {
        employee_a,
        employee_b,
        total_days: result.total_days,
        rows,
    }
}
