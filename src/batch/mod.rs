//! Offline dataset jobs for model (re)training. Not used at serving time.
//!
//! - [`run_sample`]: raw labelled URLs → class-balanced subset
//! - [`run_build`]: balanced subset → cleaned table with lexical feature columns

pub mod clean;
pub mod enrich;
pub mod sample;
mod table;

pub use clean::{clean, LABEL_COLUMN, URL_COLUMN};
pub use enrich::{BatchFeatureBuilder, BatchFeatures, DomainParts, DERIVED_COLUMNS};
pub use sample::{normalize_labels, sample_per_label};
pub use table::Table;

use crate::config::BatchConfig;
use crate::Result;
use std::path::Path;
use tracing::info;

fn log_label_counts(table: &Table, stage: &str) -> Result<()> {
    let col = table.require(LABEL_COLUMN)?;
    for (label, count) in table.value_counts(col) {
        info!(stage, label = %label, count, "label count");
    }
    Ok(())
}

/// Balance `input` to at most `per_label` rows per label and write `output`.
pub fn run_sample(input: &Path, output: &Path, per_label: usize, seed: u64) -> Result<Table> {
    let mut table = Table::read_csv(input)?;
    table.require(URL_COLUMN)?;
    normalize_labels(&mut table, LABEL_COLUMN)?;
    log_label_counts(&table, "raw")?;

    let balanced = sample_per_label(&table, LABEL_COLUMN, per_label, seed)?;
    log_label_counts(&balanced, "balanced")?;

    balanced.write_csv(output)?;
    info!(rows = balanced.len(), output = %output.display(), "balanced dataset written");
    Ok(balanced)
}

/// Clean `input`, append the derived feature columns and write `output`.
pub fn run_build(input: &Path, output: &Path, config: &BatchConfig) -> Result<Table> {
    let table = Table::read_csv(input)?;
    let cleaned = clean(&table)?;
    info!(
        input_rows = table.len(),
        kept_rows = cleaned.len(),
        "dataset cleaned"
    );

    let builder = BatchFeatureBuilder::new(config);
    let enriched = builder.enrich(&cleaned)?;
    enriched.write_csv(output)?;
    info!(rows = enriched.len(), output = %output.display(), "feature table written");
    Ok(enriched)
}
