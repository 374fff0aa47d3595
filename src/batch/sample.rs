//! Class balancing: up to N rows per label, reproducible for a given seed.

use super::clean::normalize_label;
use super::Table;
use crate::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// Trim + lower-case every value of `label_col` in place.
pub fn normalize_labels(table: &mut Table, label_col: &str) -> Result<()> {
    let col = table.require(label_col)?;
    for row in &mut table.rows {
        row[col] = normalize_label(&row[col]);
    }
    Ok(())
}

/// Group rows by normalized label (sorted), drop empty labels, and draw
/// `min(per_label, group size)` rows from each group. Each group gets its own
/// RNG seeded with `seed`, so one group's size never shifts another's draw.
pub fn sample_per_label(
    table: &Table,
    label_col: &str,
    per_label: usize,
    seed: u64,
) -> Result<Table> {
    let col = table.require(label_col)?;

    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, row) in table.rows.iter().enumerate() {
        let label = normalize_label(&row[col]);
        if !label.is_empty() {
            groups.entry(label).or_default().push(i);
        }
    }

    let mut out = Table::new(table.headers.clone());
    for (label, members) in &groups {
        let take = per_label.min(members.len());
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = rand::seq::index::sample(&mut rng, members.len(), take);
        for idx in picked.iter() {
            let mut row = table.rows[members[idx]].clone();
            row[col] = label.clone();
            out.rows.push(row);
        }
        tracing::debug!(label = %label, available = members.len(), sampled = take, "label sampled");
    }
    Ok(out)
}
