//! Readability rewrite of a pasted billing history.
//!
//! Tab-separated columns become ` | `-joined text, bare record-type labels
//! become list items, and a horizontal rule separates consecutive records.
//! Nothing is aggregated here.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tally_core::DateMarker;
use tally_core::keywords::is_category_keyword;

use crate::document::read_lines;

const RECORD_BREAK: [&str; 3] = ["", "---", ""];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSummary {
    pub lines_read: usize,
    pub lines_written: usize,
    pub records: usize,
}

#[derive(Debug, Clone)]
pub struct Formatter {
    marker: DateMarker,
}

impl Formatter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            marker: DateMarker::new()?,
        })
    }

    /// Rewrite a single line.
    pub fn prettify_line(&self, text: &str) -> String {
        let stripped = text.trim();
        if stripped.is_empty() {
            return String::new();
        }

        if text.contains('\t') {
            return text
                .split('\t')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>()
                .join(" | ");
        }

        if is_category_keyword(stripped) {
            return format!("- {stripped}");
        }

        text.trim_end().to_string()
    }

    /// Rewrite the whole document. A record break goes before every marker
    /// line except the first, unless the output already ends with one.
    pub fn format_lines(&self, lines: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(lines.len());
        let mut seen_marker = false;

        for line in lines {
            if self.marker.is_marker(line) {
                if seen_marker && !ends_with_break(&out) {
                    out.extend(RECORD_BREAK.iter().map(|s| s.to_string()));
                }
                seen_marker = true;
            }
            out.push(self.prettify_line(line));
        }

        out
    }

    /// Formatted document as a single newline-terminated string.
    pub fn render(&self, lines: &[String]) -> String {
        to_document(&self.format_lines(lines))
    }

    pub fn format_file(&self, input: &Path, output: &Path) -> Result<FormatSummary> {
        let lines = read_lines(input)?;
        let formatted = self.format_lines(&lines);
        let records = lines.iter().filter(|l| self.marker.is_marker(l)).count();

        fs::write(output, to_document(&formatted))
            .with_context(|| format!("write {}", output.display()))?;

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            records,
            "formatted document written"
        );

        Ok(FormatSummary {
            lines_read: lines.len(),
            lines_written: formatted.len(),
            records,
        })
    }
}

fn to_document(formatted: &[String]) -> String {
    let mut text = formatted.join("\n");
    text.push('\n');
    text
}

fn ends_with_break(out: &[String]) -> bool {
    out.len() >= RECORD_BREAK.len() && out[out.len() - RECORD_BREAK.len()..] == RECORD_BREAK
}
