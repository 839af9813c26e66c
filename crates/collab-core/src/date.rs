//! Flexible calendar date parsing.
//!
//! Input files come from different spreadsheets and locales, so a date cell
//! may use any of several layouts. Layouts are tried in a fixed order and the
//! first one that yields a valid calendar date wins.

use chrono::NaiveDate;

use crate::error::{AnalysisError, Result};

/// A single accepted date layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateLayout {
    /// Character shape: `9` matches an ASCII digit, anything else is literal.
    shape: &'static str,
    /// chrono format string used once the shape matches.
    format: &'static str,
}

impl DateLayout {
    const fn new(shape: &'static str, format: &'static str) -> Self {
        Self { shape, format }
    }

    fn matches_shape(&self, text: &str) -> bool {
        text.len() == self.shape.len()
            && text
                .bytes()
                .zip(self.shape.bytes())
                .all(|(c, s)| if s == b'9' { c.is_ascii_digit() } else { c == s })
    }

    /// Parses `text` with this layout, or `None` if it does not fit.
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        if !self.matches_shape(text) {
            return None;
        }
        NaiveDate::parse_from_str(text, self.format).ok()
    }
}

/// Accepted layouts in priority order.
///
/// Day-first `DD/MM/YYYY` precedes month-first `MM/DD/YYYY`, so `01/02/2013`
/// is the first of February. Reordering changes analysis results.
pub const LAYOUTS: [DateLayout; 5] = [
    DateLayout::new("9999-99-99", "%Y-%m-%d"), // YYYY-MM-DD
    DateLayout::new("9999/99/99", "%Y/%m/%d"), // YYYY/MM/DD
    DateLayout::new("99-99-9999", "%d-%m-%Y"), // DD-MM-YYYY
    DateLayout::new("99/99/9999", "%d/%m/%Y"), // DD/MM/YYYY
    DateLayout::new("99/99/9999", "%m/%d/%Y"), // MM/DD/YYYY
];

/// Parses a date cell, trying each of [`LAYOUTS`] in order.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(trimmed))
        .ok_or_else(|| AnalysisError::UnsupportedDateFormat {
            text: text.to_string(),
        })
}
