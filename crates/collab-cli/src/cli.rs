//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Employee collaboration analyzer.
///
/// Reads CSV exports of employee project assignments and finds the pair of
/// employees who worked together on common projects for the longest time.
#[derive(Debug, Parser)]
#[command(name = "collab", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find the longest-collaborating pair in each file.
    Analyze {
        /// CSV files with `EmpID, ProjectID, DateFrom, DateTo` rows.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Date used for open-ended assignments (YYYY-MM-DD, default: today).
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Also list the N pairs with the most days together.
        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },

    /// Validate files without analyzing them.
    Check {
        /// CSV files to validate.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Date used for open-ended assignments (YYYY-MM-DD, default: today).
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_args() {
        let cli = Cli::try_parse_from([
            "collab", "analyze", "a.csv", "b.csv", "--json", "--today", "2024-06-15", "--top", "3",
        ])
        .unwrap();
        let Some(Commands::Analyze {
            files,
            json,
            today,
            top,
        }) = cli.command
        else {
            panic!("expected analyze command");
        };
        assert_eq!(files, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert!(json);
        assert_eq!(today, NaiveDate::from_ymd_opt(2024, 6, 15));
        assert_eq!(top, Some(3));
    }

    #[test]
    fn test_analyze_requires_a_file() {
        assert!(Cli::try_parse_from(["collab", "analyze"]).is_err());
    }

    #[test]
    fn test_rejects_bad_today() {
        assert!(Cli::try_parse_from(["collab", "check", "a.csv", "--today", "15/06/2024"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["collab", "check", "a.csv", "-v", "-c", "cfg.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("cfg.toml")));
    }
}
