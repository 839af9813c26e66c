//! Analyze command for finding the longest-collaborating pair.
//!
//! This module implements `collab analyze` with human-readable and JSON
//! output. Each file is an independent analysis, so several files are
//! processed in parallel and printed in argument order.

use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use collab_core::{Analysis, EmployeeId, EmployeePair, RecordLoader, Report};
use rayon::prelude::*;
use serde::Serialize;

use super::util::read_input;
use crate::Config;

/// Result of analyzing a single file.
#[derive(Debug)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub report: Report,
    /// Best pairs by total days, only filled when `--top` was requested.
    pub top: Vec<(EmployeePair, i64)>,
}

/// Analyzes one file.
pub fn analyze_file(
    path: &Path,
    loader: &RecordLoader,
    today: NaiveDate,
    top: Option<usize>,
) -> Result<FileAnalysis> {
    let contents = read_input(path)?;
    let analysis = Analysis::run(loader, contents.lines(), today)
        .with_context(|| format!("failed to analyze {}", path.display()))?;

    let top = top
        .map(|n| {
            analysis
                .top_pairs(n)
                .into_iter()
                .map(|t| (t.pair, t.total_days))
                .collect()
        })
        .unwrap_or_default();

    tracing::debug!(
        path = ?path,
        employee_a = analysis.report.employee_a,
        employee_b = analysis.report.employee_b,
        total_days = analysis.report.total_days,
        "analyzed file"
    );

    Ok(FileAnalysis {
        path: path.to_path_buf(),
        report: analysis.report,
        top,
    })
}

// ========== Text Output ==========

fn days(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

/// Formats the human-readable report for one file.
pub fn format_report(analysis: &FileAnalysis) -> String {
    let report = &analysis.report;
    let mut output = String::new();

    writeln!(
        output,
        "Employees #{} and #{} worked together for {}",
        report.employee_a,
        report.employee_b,
        days(report.total_days)
    )
    .unwrap();

    writeln!(output).unwrap();
    writeln!(
        output,
        "{:>14}  {:>14}  {:>10}  {:>11}",
        "Employee ID #1", "Employee ID #2", "Project ID", "Days worked"
    )
    .unwrap();
    writeln!(output, "{:->14}  {:->14}  {:->10}  {:->11}", "", "", "", "").unwrap();

    if report.rows.is_empty() {
        writeln!(output, "(no days on any shared project)").unwrap();
    }
    for row in &report.rows {
        writeln!(
            output,
            "{:>14}  {:>14}  {:>10}  {:>11}",
            row.employee_a, row.employee_b, row.project_id, row.days_worked
        )
        .unwrap();
    }

    if !analysis.top.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "TOP PAIRS").unwrap();
        for (rank, (pair, total)) in analysis.top.iter().enumerate() {
            writeln!(output, "{:>3}. {:<20}{:>12}", rank + 1, pair.to_string(), days(*total)).unwrap();
        }
    }

    output
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub file: String,
    #[serde(flatten)]
    pub report: &'a Report,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub top: Vec<JsonPair>,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct JsonPair {
    pub employee_a: EmployeeId,
    pub employee_b: EmployeeId,
    pub total_days: i64,
}

impl<'a> JsonReport<'a> {
    fn new(analysis: &'a FileAnalysis) -> Self {
        Self {
            file: analysis.path.display().to_string(),
            report: &analysis.report,
            top: analysis
                .top
                .iter()
                .map(|(pair, total)| JsonPair {
                    employee_a: pair.low(),
                    employee_b: pair.high(),
                    total_days: *total,
                })
                .collect(),
            message: "OK",
        }
    }
}

/// Formats one file's report as JSON.
pub fn format_report_json(analysis: &FileAnalysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::new(analysis))?)
}

/// Formats several reports as one JSON array, in the given order.
pub fn format_reports_json(analyses: &[FileAnalysis]) -> Result<String> {
    let reports: Vec<JsonReport<'_>> = analyses.iter().map(JsonReport::new).collect();
    Ok(serde_json::to_string_pretty(&reports)?)
}

// ========== Public Interface ==========

/// Runs the analyze command.
///
/// Every file is reported; the command fails afterwards if any file could
/// not be analyzed. With `json` and more than one file, stdout is a single
/// JSON array holding the files that succeeded.
pub fn run<W: Write>(
    writer: &mut W,
    files: &[PathBuf],
    config: &Config,
    today: NaiveDate,
    json: bool,
    top: Option<usize>,
) -> Result<()> {
    let loader = config.loader();
    let results: Vec<Result<FileAnalysis>> = files
        .par_iter()
        .map(|path| analyze_file(path, &loader, today, top))
        .collect();

    let multiple = files.len() > 1;
    let mut failed = 0;
    let mut succeeded = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(analysis) => succeeded.push(analysis),
            Err(e) => {
                eprintln!("Error: {e:#}");
                failed += 1;
            }
        }
    }

    if json {
        if multiple {
            writeln!(writer, "{}", format_reports_json(&succeeded)?)?;
        } else if let Some(analysis) = succeeded.first() {
            writeln!(writer, "{}", format_report_json(analysis)?)?;
        }
    } else {
        for (idx, analysis) in succeeded.iter().enumerate() {
            if idx > 0 {
                writeln!(writer)?;
            }
            if multiple {
                writeln!(writer, "{}", analysis.path.display())?;
            }
            write!(writer, "{}", format_report(analysis))?;
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} file(s) could not be analyzed", files.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use collab_core::ReportRow;
    use insta::assert_snapshot;
    use tempfile::NamedTempFile;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> FileAnalysis {
        FileAnalysis {
            path: PathBuf::from("assignments.csv"),
            report: Report {
                employee_a: 143,
                employee_b: 218,
                total_days: 147,
                rows: vec![
                    ReportRow {
                        employee_a: 143,
                        employee_b: 218,
                        project_id: 10,
                        days_worked: 100,
                    },
                    ReportRow {
                        employee_a: 143,
                        employee_b: 218,
                        project_id: 12,
                        days_worked: 47,
                    },
                ],
            },
            top: vec![],
        }
    }

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_format_report() {
        let output = format_report(&sample());
        let expected = "\
Employees #143 and #218 worked together for 147 days

Employee ID #1  Employee ID #2  Project ID  Days worked
--------------  --------------  ----------  -----------
           143             218          10          100
           143             218          12           47
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_format_report_with_top_pairs() {
        let mut analysis = sample();
        analysis.top = vec![
            (EmployeePair::new(143, 218).unwrap(), 147),
            (EmployeePair::new(7, 143).unwrap(), 1),
        ];
        let output = format_report(&analysis);
        let top_section = output.split("TOP PAIRS\n").nth(1).unwrap();
        assert_eq!(
            top_section,
            "  1. #143 & #218             147 days\n  2. #7 & #143                  1 day\n"
        );
    }

    #[test]
    fn test_format_report_json() {
        let mut analysis = sample();
        analysis.top = vec![(EmployeePair::new(143, 218).unwrap(), 147)];
        let output = format_report_json(&analysis).unwrap();
        assert_snapshot!(output, @r#"
        {
          "file": "assignments.csv",
          "employee_a": 143,
          "employee_b": 218,
          "total_days": 147,
          "rows": [
            {
              "employee_a": 143,
              "employee_b": 218,
              "project_id": 10,
              "days_worked": 100
            },
            {
              "employee_a": 143,
              "employee_b": 218,
              "project_id": 12,
              "days_worked": 47
            }
          ],
          "top": [
            {
              "employee_a": 143,
              "employee_b": 218,
              "total_days": 147
            }
          ],
          "message": "OK"
        }
        "#);
    }

    #[test]
    fn test_analyze_file_end_to_end() {
        let file = csv_file(
            "EmpID, ProjectID, DateFrom, DateTo\n\
             143, 12, 2013-11-01, 2014-01-05\n\
             218, 10, 2012-05-16, NULL\n\
             143, 10, 2009-01-01, 2011-04-27\n\
             218, 12, 2013-12-01, 2014-02-01\n",
        );
        let analysis =
            analyze_file(file.path(), &RecordLoader::default(), date(2020, 1, 1), Some(5)).unwrap();

        // Project 10: 2012-05-16..2011-04-27 never overlaps
        // Project 12: 2013-12-01..2014-01-05 is 35 days
        assert_eq!((analysis.report.employee_a, analysis.report.employee_b), (143, 218));
        assert_eq!(analysis.report.total_days, 35);
        assert_eq!(analysis.report.rows.len(), 1);
        assert_eq!(analysis.report.rows[0].project_id, 12);
        assert_eq!(analysis.top.len(), 1);
    }

    #[test]
    fn test_run_reports_every_file_then_fails() {
        let good = csv_file("1,1,2020-01-01,2020-01-10\n2,1,2020-01-05,2020-01-15\n");
        let bad = csv_file("1,1,2020-01-01\n");
        let files = vec![good.path().to_path_buf(), bad.path().to_path_buf()];

        let mut output = Vec::new();
        let err = run(&mut output, &files, &Config::default(), date(2024, 1, 1), false, None)
            .unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 file(s) could not be analyzed");

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with(&format!("{}\n", good.path().display())));
        assert!(output.contains("Employees #1 and #2 worked together for 5 days"));
    }

    #[test]
    fn test_run_failed_first_file_leaves_no_leading_blank_line() {
        let bad = csv_file("not,a,valid\n");
        let good = csv_file("1,1,2020-01-01,2020-01-10\n2,1,2020-01-05,2020-01-15\n");
        let files = vec![bad.path().to_path_buf(), good.path().to_path_buf()];

        let mut output = Vec::new();
        run(&mut output, &files, &Config::default(), date(2024, 1, 1), false, None).unwrap_err();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with(&format!("{}\n", good.path().display())));
    }

    #[test]
    fn test_run_json_multiple_files_is_one_array() {
        let first = csv_file("1,1,2020-01-01,2020-01-10\n2,1,2020-01-05,2020-01-15\n");
        let second = csv_file("3,4,2020-01-01,2020-01-03\n5,4,2020-01-01,2020-01-03\n");
        let files = vec![first.path().to_path_buf(), second.path().to_path_buf()];

        let mut output = Vec::new();
        run(&mut output, &files, &Config::default(), date(2024, 1, 1), true, None).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let reports = json.as_array().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["total_days"], 5);
        assert_eq!(reports[1]["employee_a"], 3);
        assert_eq!(reports[1]["total_days"], 2);
    }

    #[test]
    fn test_analyze_file_error_names_file_and_line() {
        let file = csv_file("empId,projectId,dateFrom,dateTo\n1,1,2020-01-01,2020-01-10\n1;2;3\n");
        let err = analyze_file(file.path(), &RecordLoader::default(), date(2024, 1, 1), None)
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains(&format!("failed to analyze {}", file.path().display())));
        assert!(message.ends_with("malformed row at line 3: 1;2;3"));
    }
}
