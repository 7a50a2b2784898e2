// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Loads a saved forest once, then predicts labels for every
// row of a CSV file:
//
//   Step 1: Load the model artifact     (Layer 6 - infra)
//   Step 2: Load the input CSV          (Layer 4 - data)
//   Step 3: Align columns + predict     (Layer 5 - ml)

use anyhow::Result;
use std::path::Path;

use crate::data::loader::CsvLoader;
use crate::domain::traits::TableSource;
use crate::infra::model_store::ModelStore;
use crate::ml::inferencer::Inferencer;

pub struct PredictUseCase {
    inferencer: Inferencer,
}

impl PredictUseCase {
    /// Load the model at `model_path`
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self> {
        let store      = ModelStore::new(model_path);
        let inferencer = Inferencer::from_store(&store)?;
        Ok(Self { inferencer })
    }

    /// One predicted label per data row of the CSV at `input_path`
    pub fn predict_file(&self, input_path: impl AsRef<Path>) -> Result<Vec<String>> {
        let table = CsvLoader::new(input_path).load_table()?;
        tracing::info!("Predicting {} rows", table.n_rows());
        self.inferencer.predict_table(&table)
    }
}
