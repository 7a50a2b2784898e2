// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// the application layer never needs to know that the table
// comes from a CSV file or that the model is a random forest.
//
//   - CsvLoader              implements TableSource
//   - RandomForestClassifier implements Classifier + Persistable
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use anyhow::Result;
use crate::domain::table::DataTable;

// ─── TableSource ──────────────────────────────────────────────────────────────
/// Any component that can produce a raw table of named columns.
pub trait TableSource {
    fn load_table(&self) -> Result<DataTable>;
}

// ─── Classifier ───────────────────────────────────────────────────────────────
/// Any fitted model that maps one feature row to a class label.
pub trait Classifier {
    /// Predict the label for a single sample.
    /// `features` must be in the order the model was trained on.
    fn predict(&self, features: &[f64]) -> Result<String>;
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any component whose state can be saved and restored from disk.
pub trait Persistable: Sized {
    /// Save this component's state to the given path,
    /// replacing whatever was there.
    fn save(&self, path: &Path) -> Result<()>;

    /// Load a component's state from the given path.
    fn load(path: &Path) -> Result<Self>;
}
