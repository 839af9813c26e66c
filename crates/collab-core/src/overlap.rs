//! Pairwise overlap aggregation.
//!
//! # Algorithm Summary
//!
//! 1. Group assignments by project (projects are scanned in ascending id)
//! 2. Within each project, compare every pair of assignments held by two
//!    different employees and count the days their ranges share
//! 3. Accumulate those days per employee pair, both in total and per project
//! 4. The pair with the largest total wins; on a tie the pair that was
//!    encountered first during the scan wins

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::assignment::{Assignment, EmployeePair, ProjectId};

/// Days shared by two assignments.
///
/// Measured from the later start to the earlier end, so ranges that only
/// touch on a single day share zero days. Disjoint or inverted ranges never
/// go below zero.
pub fn overlap_days(a: &Assignment, b: &Assignment) -> i64 {
    let start: NaiveDate = a.date_from.max(b.date_from);
    let end: NaiveDate = a.date_to.min(b.date_to);
    (end - start).num_days().max(0)
}

/// Accumulated overlap for one employee pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairTotal {
    pub pair: EmployeePair,

    /// Sum of overlap days across every shared project.
    pub total_days: i64,

    /// Overlap days per shared project, including projects with zero days.
    pub per_project: BTreeMap<ProjectId, i64>,
}

impl PairTotal {
    fn new(pair: EmployeePair) -> Self {
        Self {
            pair,
            total_days: 0,
            per_project: BTreeMap::new(),
        }
    }

    fn add(&mut self, project_id: ProjectId, days: i64) {
        *self.per_project.entry(project_id).or_insert(0) += days;
        self.total_days += days;
    }
}

/// Every pair seen during one scan, in the order first encountered.
#[derive(Debug, Clone, Default)]
pub struct PairLedger {
    totals: Vec<PairTotal>,
    index: HashMap<EmployeePair, usize>,
}

impl PairLedger {
    fn record(&mut self, pair: EmployeePair, project_id: ProjectId, days: i64) {
        let slot = *self.index.entry(pair).or_insert_with(|| {
            self.totals.push(PairTotal::new(pair));
            self.totals.len() - 1
        });
        self.totals[slot].add(project_id, days);
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Totals for a specific pair, if the pair shared any project.
    pub fn get(&self, pair: &EmployeePair) -> Option<&PairTotal> {
        self.index.get(pair).map(|&slot| &self.totals[slot])
    }

    /// Pairs by descending total; ties keep encounter order.
    pub fn ranked(&self) -> Vec<&PairTotal> {
        let mut ranked: Vec<&PairTotal> = self.totals.iter().collect();
        ranked.sort_by_key(|t| std::cmp::Reverse(t.total_days));
        ranked
    }

    /// The pair with the strictly largest total, first encountered on a tie.
    pub fn best(&self) -> Option<AggregationResult> {
        let mut best: Option<&PairTotal> = None;
        for total in &self.totals {
            if best.is_none_or(|b| total.total_days > b.total_days) {
                best = Some(total);
            }
        }
        best.map(AggregationResult::from_total)
    }
}

/// The winning pair of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    pub pair: EmployeePair,

    /// Overlap days per project; projects with zero days are left out.
    pub per_project: BTreeMap<ProjectId, i64>,

    pub total_days: i64,
}

impl AggregationResult {
    fn from_total(total: &PairTotal) -> Self {
        Self {
            pair: total.pair,
            per_project: total
                .per_project
                .iter()
                .filter(|&(_, &days)| days > 0)
                .map(|(&project, &days)| (project, days))
                .collect(),
            total_days: total.total_days,
        }
    }
}

/// Scans all assignments and records every collaborating pair.
pub fn tally(assignments: &[Assignment]) -> PairLedger {
    let mut by_project: BTreeMap<ProjectId, Vec<&Assignment>> = BTreeMap::new();
    for assignment in assignments {
        by_project
            .entry(assignment.project_id)
            .or_default()
            .push(assignment);
    }

    let mut ledger = PairLedger::default();
    for (&project_id, members) in &by_project {
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                // Same employee twice on a project is not a collaboration
                let Some(pair) = EmployeePair::new(a.employee_id, b.employee_id) else {
                    continue;
                };
                ledger.record(pair, project_id, overlap_days(a, b));
            }
        }
    }

    tracing::debug!(
        projects = by_project.len(),
        pairs = ledger.len(),
        "tallied pair overlaps"
    );
    ledger
}

/// Finds the pair with the most days worked together.
///
/// Returns `None` when no two different employees share a project.
pub fn aggregate(assignments: &[Assignment]) -> Option<AggregationResult> {
    tally(assignments).best()
}
