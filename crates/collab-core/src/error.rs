//! Error types for an analysis run.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors that end an analysis run.
///
/// Every variant is terminal for the current input: loading stops at the
/// first offending row and reports it to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A row did not split into exactly four comma-separated fields.
    #[error("malformed row at line {line_number}: {content}")]
    MalformedRow { line_number: usize, content: String },

    /// An employee or project id was not a valid integer.
    #[error("invalid integer at line {line_number}: {value:?}")]
    InvalidInteger {
        line_number: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A date matched none of the supported layouts.
    #[error("unsupported date format: {text}")]
    UnsupportedDateFormat { text: String },

    /// Nothing left to analyze after loading.
    #[error("no data to analyze")]
    NoData,
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
