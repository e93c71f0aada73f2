//! Reading a pasted billing export from disk.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Read a document and split it into lines. Invalid UTF-8 bytes are dropped.
/// A missing file is an error; there is no fallback input.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        bail!("input not found: {}", path.display());
    }
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let text = decode_lossy(&bytes);
    let lines = split_lines(&text);
    tracing::debug!(path = %path.display(), lines = lines.len(), "read document");
    Ok(lines)
}

/// Decode UTF-8, silently discarding invalid byte sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// Split on every line boundary (`\n`, `\r\n`, `\r` and the Unicode line and
/// paragraph separators). A trailing terminator does not produce an extra
/// empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if is_line_boundary(c) {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{1C}' | '\u{1D}' | '\u{1E}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}
