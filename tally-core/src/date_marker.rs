//! Record date markers, e.g. `2025 年 12 月 1 日\tSteam 社区市场`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct DateMarker {
    re: Regex,
}

impl DateMarker {
    pub fn new() -> Result<Self> {
        let re = Regex::new(concat!(
            r"^(?P<year>\d{4})\s*年\s*",
            r"(?P<month>\d{1,2})\s*月\s*",
            r"(?P<day>\d{1,2})\s*日"
        ))
        .context("compile date marker pattern")?;
        Ok(Self { re })
    }

    /// True when the trimmed line starts a new record.
    pub fn is_marker(&self, line: &str) -> bool {
        self.re.is_match(line.trim())
    }

    /// Calendar date named by the marker. A line can be a marker and still
    /// name an impossible date (month 13); that gives `None`.
    pub fn date(&self, line: &str) -> Option<NaiveDate> {
        let caps = self.re.captures(line.trim())?;
        let year: i32 = caps["year"].parse().ok()?;
        let month: u32 = caps["month"].parse().ok()?;
        let day: u32 = caps["day"].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}
