// ============================================================
// Layer 4 — Feature / Target Preprocessor
// ============================================================
// Turns a raw DataTable into (X, y):
//
//   X — every column except the target, parsed as f64
//   y — the target column, kept as string labels
//
// X always has exactly one column fewer than the table.
//
// There is no imputation and no categorical encoding:
//   - an empty cell anywhere is an error
//   - a feature cell that is not a finite number is an error
//     (inf and NaN parse as f64 but are rejected)
//
// Numeric labels are canonicalised ("1.0" → "1") when every label
// is a number, so they group the way numeric columns do.
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

use anyhow::{bail, Result};

use crate::domain::matrix::{FeatureMatrix, TargetVector};
use crate::domain::table::DataTable;

/// Split `table` into a numeric feature matrix and the `target` labels.
pub fn split_target(table: &DataTable, target: &str) -> Result<(FeatureMatrix, TargetVector)> {
    let target_idx = match table.column_index(target) {
        Some(i) => i,
        None => bail!(
            "Target column '{}' not found (columns: {})",
            target,
            table.headers.join(", ")
        ),
    };

    // Feature columns keep their file order, minus the target
    let feature_cols: Vec<usize> = (0..table.n_cols()).filter(|&c| c != target_idx).collect();
    let feature_names: Vec<String> = feature_cols
        .iter()
        .map(|&c| table.headers[c].clone())
        .collect();

    let mut rows   = Vec::with_capacity(table.n_rows());
    let mut labels = Vec::with_capacity(table.n_rows());

    for (r, row) in table.rows.iter().enumerate() {
        let label = &row[target_idx];
        if label.is_empty() {
            bail!("Row {}: missing value in target column '{}'", r + 1, target);
        }
        labels.push(label.clone());

        let mut values = Vec::with_capacity(feature_cols.len());
        for &c in &feature_cols {
            values.push(parse_cell(&row[c], &table.headers[c], r)?);
        }
        rows.push(values);
    }

    Ok((FeatureMatrix::new(feature_names, rows), TargetVector::new(canonical_labels(labels))))
}

/// Rewrite numeric labels through f64 so "1", "1.0" and "1e0" are one class.
/// Left untouched unless every label is a number.
fn canonical_labels(labels: Vec<String>) -> Vec<String> {
    let parsed: Option<Vec<f64>> = labels.iter().map(|l| l.parse::<f64>().ok()).collect();
    match parsed {
        Some(values) => values.iter().map(f64::to_string).collect(),
        None => labels,
    }
}

/// Parse a single feature cell, naming the column and row on failure.
pub fn parse_cell(cell: &str, column: &str, row: usize) -> Result<f64> {
    if cell.is_empty() {
        bail!("Row {}: missing value in feature column '{}'", row + 1, column);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => bail!(
            "Row {}: feature column '{}' holds non-finite value '{}'",
            row + 1,
            column,
            cell
        ),
        Err(_) => bail!(
            "Row {}: feature column '{}' holds non-numeric value '{}'",
            row + 1,
            column,
            cell
        ),
    }
}
