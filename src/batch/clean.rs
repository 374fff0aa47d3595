//! Row cleaning ahead of feature building.

use super::Table;
use crate::Result;
use std::collections::HashSet;

pub const URL_COLUMN: &str = "url";
pub const LABEL_COLUMN: &str = "type";

/// Trim and lower-case a label.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Drop rows with an empty `url` or `type`, trim urls, normalize labels,
/// then keep the first row of every `(url, type)` pair.
pub fn clean(table: &Table) -> Result<Table> {
    let url_col = table.require(URL_COLUMN)?;
    let label_col = table.require(LABEL_COLUMN)?;

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut out = Table::new(table.headers.clone());
    for row in &table.rows {
        if row[url_col].is_empty() || row[label_col].is_empty() {
            continue;
        }
        let mut row = row.clone();
        row[url_col] = row[url_col].trim().to_string();
        row[label_col] = normalize_label(&row[label_col]);
        if seen.insert((row[url_col].clone(), row[label_col].clone())) {
            out.rows.push(row);
        }
    }
    Ok(out)
}
