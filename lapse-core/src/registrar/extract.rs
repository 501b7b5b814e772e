//! Expiry-row extraction from the registrar's HTML record table.
//!
//! The PKNIC record page lays the registration out as table rows where a
//! label cell ("Create Date", "Expire Date", ...) is followed by a spacer
//! cell and then the value cell. The extractor looks for the first
//! non-empty cell containing "Expire" and takes the cell two positions to
//! its right as the date, e.g. `Dec, 31, 2025`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{LapseError, Result};
use crate::expiry::RawExpiryDate;

static ROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").expect("valid row regex"));
static CELL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<td[^>]*>(.*?)</td>").expect("valid cell regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));

/// Locate the "Expire" row in the registrar page and extract the adjacent
/// date cell as a raw month/day/year triplet.
///
/// Fails with `ExpiryRowNotFound` when no row carries an expiry label, and
/// with `DateParse` when the adjacent cell is missing or not a
/// three-token date.
pub fn extract_expiry_date(html: &str, domain: &str) -> Result<RawExpiryDate> {
    for row in ROW_RE.captures_iter(html) {
        let cells: Vec<String> = CELL_RE
            .captures_iter(&row[1])
            .map(|c| cell_text(&c[1]))
            .collect();

        for (i, cell) in cells.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            if cell.contains("Expire") {
                let value = cells
                    .get(i + 2)
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| {
                        LapseError::DateParse(format!(
                            "Expire row for {} has no adjacent date cell",
                            domain
                        ))
                    })?;
                return split_date_cell(value);
            }
        }
    }

    Err(LapseError::ExpiryRowNotFound(domain.to_string()))
}

/// Strip tags and entities from a cell body and collapse whitespace.
fn cell_text(cell: &str) -> String {
    let stripped = TAG_RE.replace_all(cell, " ");
    let decoded = stripped.replace("&nbsp;", " ").replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tokenize a date cell like `Dec, 31, 2025` into its triplet, stripping
/// trailing commas from each token.
fn split_date_cell(value: &str) -> Result<RawExpiryDate> {
    let tokens: Vec<&str> = value
        .split_whitespace()
        .map(|t| t.trim_end_matches(','))
        .collect();

    match tokens.as_slice() {
        [month, day, year] => Ok(RawExpiryDate::new(*month, *day, *year)),
        _ => Err(LapseError::DateParse(value.to_string())),
    }
}
