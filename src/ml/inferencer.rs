// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Wraps a loaded forest and predicts labels for a raw table.
//
// Columns are matched by name against the feature names stored
// in the model, so the input may have its columns in any order
// and may carry extras (e.g. the `failure` column) that are
// ignored. A missing feature column is an error.

use anyhow::{bail, Result};

use crate::data::preprocessor::parse_cell;
use crate::domain::matrix::FeatureMatrix;
use crate::domain::table::DataTable;
use crate::infra::model_store::ModelStore;
use crate::ml::forest::RandomForestClassifier;

pub struct Inferencer {
    model: RandomForestClassifier,
}

impl Inferencer {
    pub fn new(model: RandomForestClassifier) -> Self {
        Self { model }
    }

    pub fn from_store(store: &ModelStore) -> Result<Self> {
        let model = store.load()?;
        tracing::info!(
            "Model loaded from '{}' ({} trees, {} features)",
            store.path().display(),
            model.trees().len(),
            model.feature_names().len()
        );
        Ok(Self::new(model))
    }

    /// Build a feature matrix in the model's column order
    pub fn align(&self, table: &DataTable) -> Result<FeatureMatrix> {
        let mut cols = Vec::with_capacity(self.model.feature_names().len());
        for name in self.model.feature_names() {
            match table.column_index(name) {
                Some(c) => cols.push(c),
                None => bail!("Input is missing feature column '{}'", name),
            }
        }

        let mut rows = Vec::with_capacity(table.n_rows());
        for (r, row) in table.rows.iter().enumerate() {
            let values = cols
                .iter()
                .map(|&c| parse_cell(&row[c], &table.headers[c], r))
                .collect::<Result<Vec<f64>>>()?;
            rows.push(values);
        }

        Ok(FeatureMatrix::new(self.model.feature_names().to_vec(), rows))
    }

    /// Predict one label per table row
    pub fn predict_table(&self, table: &DataTable) -> Result<Vec<String>> {
        let x = self.align(table)?;
        self.model.predict_matrix(&x)
    }
}
