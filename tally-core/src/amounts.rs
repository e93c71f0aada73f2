//! Currency-amount token scanning.
//!
//! A token is an optional sign, optional whitespace, one of the two yen glyphs,
//! optional whitespace and a numeric body of digits, grouping commas and a
//! decimal point:
//!
//!   ¥ 76.80    -¥ 31.37    +￥1,024.50
//!
//! Only magnitudes are returned. Bodies that do not parse are skipped.

use anyhow::{Context, Result};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::precision::Precision;

/// Half-width (U+00A5) and full-width (U+FFE5) yen signs.
pub const GLYPHS: [char; 2] = ['¥', '￥'];

const CREDIT_TOKENS: [&str; 2] = ["+¥", "+￥"];
const SIGNED_TOKENS: [&str; 4] = ["+¥", "+￥", "-¥", "-￥"];

/// Scans lines for currency tokens. Holds the compiled patterns and the
/// precision used when amounts are summed.
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    token_re: Regex,
    credit_re: Regex,
    precision: Precision,
}

impl AmountExtractor {
    pub fn new(precision: Precision) -> Result<Self> {
        let token_re =
            Regex::new(r"[+-]?\s*[¥￥]\s*([\d,.]+)").context("compile amount token pattern")?;
        let credit_re =
            Regex::new(r"\+\s*[¥￥]\s*([\d,.]+)").context("compile credit token pattern")?;
        Ok(Self {
            token_re,
            credit_re,
            precision,
        })
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// All amounts on the line, sign ignored, in order of appearance.
    pub fn extract(&self, line: &str) -> Vec<Decimal> {
        scan(&self.token_re, line)
    }

    /// Amounts carrying an explicit leading `+`.
    pub fn extract_credits(&self, line: &str) -> Vec<Decimal> {
        scan(&self.credit_re, line)
    }

    pub fn line_total(&self, line: &str) -> Decimal {
        self.precision.sum(self.extract(line))
    }

    pub fn credit_total(&self, line: &str) -> Decimal {
        self.precision.sum(self.extract_credits(line))
    }
}

fn scan(re: &Regex, line: &str) -> Vec<Decimal> {
    re.captures_iter(line)
        .filter_map(|caps| parse_amount(&caps[1]))
        .collect()
}

/// Zero code points of the Unicode decimal-digit runs (`Nd`, ten digits
/// each) that `\d` can match, besides ASCII.
const DIGIT_ZEROS: [u32; 45] = [
    0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66, 0x0CE6,
    0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946, 0x19D0,
    0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0, 0xA9F0,
    0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x11066, 0x110F0, 0x11136, 0x1D7CE, 0x1D7D8, 0x1D7E2,
    0x1D7EC, 0x1D7F6,
];

/// ASCII value of a decimal digit from any supported script, e.g. `１` → `1`.
fn ascii_digit(c: char) -> Option<char> {
    if c.is_ascii_digit() {
        return Some(c);
    }
    let cp = c as u32;
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&cp))
        .and_then(|&zero| char::from_digit(cp - zero, 10))
}

/// Parse a numeric body such as `1,024.50` or `１２８.００`. Grouping commas
/// are dropped and digits from other scripts are read as ASCII; anything that
/// is not a plain decimal (`1.2.3`, `,`, `.`) yields `None`.
pub fn parse_amount(body: &str) -> Option<Decimal> {
    let mut cleaned = String::with_capacity(body.len());
    for c in body.chars().filter(|&c| c != ',') {
        match c {
            '.' => cleaned.push('.'),
            _ => cleaned.push(ascii_digit(c)?),
        }
    }
    if cleaned.matches('.').count() > 1 || !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = match (cleaned.starts_with('.'), cleaned.ends_with('.')) {
        (true, _) => format!("0{cleaned}"),
        (false, true) => cleaned.trim_end_matches('.').to_string(),
        (false, false) => cleaned,
    };

    Decimal::from_str(&normalized).ok().map(|d| d.abs())
}

pub fn has_glyph(line: &str) -> bool {
    line.contains(GLYPHS)
}

/// `+¥` / `+￥` written without a gap.
pub fn has_credit_token(line: &str) -> bool {
    CREDIT_TOKENS.iter().any(|t| line.contains(t))
}

/// Any sign written directly against a glyph.
pub fn has_signed_token(line: &str) -> bool {
    SIGNED_TOKENS.iter().any(|t| line.contains(t))
}
