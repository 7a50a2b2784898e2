// ============================================================
// Layer 3 — Feature Matrix and Target Vector
// ============================================================
// X and y, as derived from a DataTable by the preprocessor.
//
//   FeatureMatrix — row-major f64 values plus ordered feature names
//   TargetVector  — one string label per row
//
// Both support `select(indices)` so the splitter can carve out
// train/test partitions without knowing their internals.
//
// Reference: Rust Book §8 (Vectors)
//            Rust Book §13 (Iterators)

use std::cmp::Ordering;

/// Numeric feature matrix, one inner Vec per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub feature_names: Vec<String>,
    pub rows:          Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn new(feature_names: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        Self { feature_names, rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Copy out the rows at `indices`, in that order
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            feature_names: self.feature_names.clone(),
            rows:          indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

/// Class labels, one per sample, kept as the strings read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetVector {
    pub labels: Vec<String>,
}

impl TargetVector {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            labels: indices.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }

    /// Sorted unique labels.
    ///
    /// When every label parses as a number the order is numeric
    /// ("2" before "10"), otherwise it is plain string order.
    pub fn classes(&self) -> Vec<String> {
        let mut classes = self.labels.clone();
        classes.sort();
        classes.dedup();

        // Stable sort, so "1" and "1.0" keep their string order
        if classes.iter().all(|l| l.parse::<f64>().is_ok()) {
            classes.sort_by(|a, b| {
                match (a.parse::<f64>(), b.parse::<f64>()) {
                    (Ok(a), Ok(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                    _ => Ordering::Equal,
                }
            });
        }
        classes
    }

    /// Map every label to its position in `classes`.
    /// Labels missing from `classes` map to None.
    pub fn encode(&self, classes: &[String]) -> Vec<Option<usize>> {
        self.labels
            .iter()
            .map(|l| classes.iter().position(|c| c == l))
            .collect()
    }
}
