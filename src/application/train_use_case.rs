// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the CSV dataset            (Layer 4 - data)
//   Step 2: Separate features and target    (Layer 4 - data)
//   Step 3: Split train/test (80/20, 42)    (Layer 4 - data)
//   Step 4: Fit the random forest           (Layer 5 - ml)
//   Step 5: Save the model artifact         (Layer 6 - infra)
//
// The test partition is produced by step 3 and then dropped;
// nothing scores the model against it.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::data::{
    loader::CsvLoader,
    preprocessor::split_target,
    splitter::train_test_split,
};
use crate::domain::traits::TableSource;
use crate::infra::model_store::ModelStore;
use crate::ml::forest::ForestParams;
use crate::ml::trainer::run_training;

pub const DEFAULT_DATASET_PATH: &str = "brake_failure_updated_dataset.csv";
pub const DEFAULT_MODEL_PATH:   &str = "model.pkl";
pub const DEFAULT_TARGET:       &str = "failure";
pub const DEFAULT_TEST_SIZE:    f64  = 0.2;
pub const DEFAULT_SPLIT_SEED:   u64  = 42;

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything a training run needs. Serialisable so a run can be
// described in a JSON file and passed with `train --config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub dataset_path:  String,
    pub model_path:    String,
    pub target_column: String,
    pub test_size:     f64,
    pub split_seed:    u64,
    pub forest:        ForestParams,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path:  DEFAULT_DATASET_PATH.to_string(),
            model_path:    DEFAULT_MODEL_PATH.to_string(),
            target_column: DEFAULT_TARGET.to_string(),
            test_size:     DEFAULT_TEST_SIZE,
            split_seed:    DEFAULT_SPLIT_SEED,
            forest:        ForestParams::default(),
        }
    }
}

impl TrainConfig {
    /// Read a TrainConfig from JSON. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid training config in '{}'", path.display()))
    }
}

/// What a finished run produced — used for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub n_train:    usize,
    pub n_test:     usize,
    pub n_features: usize,
    pub model_path: String,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;

        // ── Step 1: Load the dataset ──────────────────────────────────────────
        tracing::info!("Loading dataset from '{}'", cfg.dataset_path);
        let table = CsvLoader::new(&cfg.dataset_path).load_table()?;
        tracing::info!("Loaded {} rows x {} columns", table.n_rows(), table.n_cols());

        // ── Step 2: X = table minus target, y = target ────────────────────────
        let (x, y) = split_target(&table, &cfg.target_column)?;

        // ── Step 3: Train / test split ────────────────────────────────────────
        let split = train_test_split(&x, &y, cfg.test_size, cfg.split_seed)?;
        tracing::info!(
            "Split: {} train, {} test ({} features)",
            split.x_train.n_rows(),
            split.x_test.n_rows(),
            split.x_train.n_features()
        );

        // ── Step 4: Fit on the training partition ─────────────────────────────
        let model = run_training(&cfg.forest, &split.x_train, &split.y_train)?;

        // ── Step 5: Persist ───────────────────────────────────────────────────
        let store = ModelStore::new(&cfg.model_path);
        store.save(&model)?;
        tracing::info!("Model written to '{}'", cfg.model_path);

        Ok(TrainReport {
            n_train:    split.x_train.n_rows(),
            n_test:     split.x_test.n_rows(),
            n_features: split.x_train.n_features(),
            model_path: cfg.model_path.clone(),
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::Classifier;
    use std::fmt::Write as _;
    use tempfile::TempDir;

    /// Row `i` of the synthetic dataset: 5 features, failure = 1 when pad_wear > 0.6
    fn sample(i: usize) -> (Vec<f64>, &'static str) {
        let wear = (i % 10) as f64 / 10.0;
        let features = vec![
            wear,
            (200 + (i * 3) % 50) as f64,
            (30 + i % 7) as f64,
            ((i * 11) % 120) as f64,
            (1000 * i) as f64,
        ];
        (features, if wear > 0.6 { "1" } else { "0" })
    }

    fn write_dataset(dir: &TempDir) -> String {
        let mut csv = String::from("pad_wear,disc_temp,pressure,speed,mileage,failure\n");
        for i in 0..100 {
            let (f, label) = sample(i);
            writeln!(csv, "{},{},{},{},{},{}", f[0], f[1], f[2], f[3], f[4], label).unwrap();
        }
        let path = dir.path().join("brake.csv");
        fs::write(&path, csv).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn config(dir: &TempDir) -> TrainConfig {
        TrainConfig {
            dataset_path: write_dataset(dir),
            model_path:   dir.path().join("model.pkl").to_string_lossy().into_owned(),
            forest:       ForestParams { n_estimators: 25, ..ForestParams::default() },
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_defaults_match_script_constants() {
        let cfg = TrainConfig::default();
        assert_eq!(cfg.dataset_path, "brake_failure_updated_dataset.csv");
        assert_eq!(cfg.model_path, "model.pkl");
        assert_eq!(cfg.target_column, "failure");
        assert_eq!(cfg.test_size, 0.2);
        assert_eq!(cfg.split_seed, 42);
        assert_eq!(cfg.forest, ForestParams::default());
    }

    #[test]
    fn test_full_pipeline_writes_loadable_model() {
        let dir    = tempfile::tempdir().unwrap();
        let cfg    = config(&dir);
        let report = TrainUseCase::new(cfg.clone()).execute().unwrap();

        assert_eq!(report.n_train, 80);
        assert_eq!(report.n_test, 20);
        assert_eq!(report.n_features, 5);

        let meta = fs::metadata(&cfg.model_path).unwrap();
        assert!(meta.len() > 0);

        let model = ModelStore::new(&cfg.model_path).load().unwrap();
        assert_eq!(model.feature_names().len(), 5);
        assert_eq!(model.classes(), &["0", "1"]);

        let correct = (0..100)
            .filter(|&i| {
                let (f, label) = sample(i);
                model.predict(&f).unwrap() == label
            })
            .count();
        assert!(correct >= 90, "only {correct}/100 rows predicted correctly");
    }

    #[test]
    fn test_second_run_overwrites_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        fs::write(&cfg.model_path, b"stale").unwrap();

        TrainUseCase::new(cfg.clone()).execute().unwrap();
        let first = fs::read(&cfg.model_path).unwrap();
        assert_ne!(first, b"stale");

        // Unseeded forest: the second artifact is a different model
        TrainUseCase::new(cfg.clone()).execute().unwrap();
        let second = fs::read(&cfg.model_path).unwrap();
        assert!(!second.is_empty());
        assert!(ModelStore::new(&cfg.model_path).load().is_ok());
    }

    #[test]
    fn test_missing_dataset_leaves_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig {
            dataset_path: dir.path().join("absent.csv").to_string_lossy().into_owned(),
            model_path:   dir.path().join("model.pkl").to_string_lossy().into_owned(),
            ..TrainConfig::default()
        };

        assert!(TrainUseCase::new(cfg.clone()).execute().is_err());
        assert!(!Path::new(&cfg.model_path).exists());
    }

    #[test]
    fn test_missing_dataset_keeps_existing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig {
            dataset_path: dir.path().join("absent.csv").to_string_lossy().into_owned(),
            model_path:   dir.path().join("model.pkl").to_string_lossy().into_owned(),
            ..TrainConfig::default()
        };
        fs::write(&cfg.model_path, b"previous").unwrap();

        assert!(TrainUseCase::new(cfg.clone()).execute().is_err());
        assert_eq!(fs::read(&cfg.model_path).unwrap(), b"previous");
    }

    #[test]
    fn test_config_from_partial_json() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.json");
        fs::write(&path, r#"{ "model_path": "out.bin", "forest": { "n_estimators": 7 } }"#).unwrap();

        let cfg = TrainConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.model_path, "out.bin");
        assert_eq!(cfg.forest.n_estimators, 7);
        assert_eq!(cfg.forest.max_features, crate::ml::forest::MaxFeatures::Sqrt);
        assert_eq!(cfg.dataset_path, DEFAULT_DATASET_PATH);
    }
}
