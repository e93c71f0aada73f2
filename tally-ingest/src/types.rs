use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One record of the billing history: a date-marker line and everything up
/// to the next marker. The leading block (text before the first marker) has
/// no marker at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Date named by the marker line; `None` for the leading block or an
    /// impossible calendar date.
    pub date: Option<NaiveDate>,
    /// Whether the first line is a date marker.
    pub dated: bool,
    pub lines: Vec<String>,
}

impl Block {
    /// First line, trimmed; used as a label in breakdowns.
    pub fn header(&self) -> &str {
        self.lines.first().map(|l| l.trim()).unwrap_or("")
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}
