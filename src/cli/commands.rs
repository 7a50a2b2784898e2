// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `predict`.
//
// Every `train` flag defaults to the same constant the bare
// invocation uses, so `brake-model` and `brake-model train`
// do exactly the same thing.
//
// Reference: Rust Book §12 (Building a CLI Program)

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::application::train_use_case::{
    TrainConfig, DEFAULT_DATASET_PATH, DEFAULT_MODEL_PATH, DEFAULT_SPLIT_SEED, DEFAULT_TARGET,
    DEFAULT_TEST_SIZE,
};
use crate::ml::forest::ForestParams;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the random forest and save it (the default when no subcommand is given)
    Train(TrainArgs),

    /// Predict labels for a CSV file with a saved model
    Predict(PredictArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV dataset with a header row
    #[arg(long, default_value = DEFAULT_DATASET_PATH)]
    pub dataset: String,

    /// Where to write the trained model (overwritten)
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    pub model_out: String,

    /// Name of the label column
    #[arg(long, default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Fraction of rows held out as the test partition
    #[arg(long, default_value_t = DEFAULT_TEST_SIZE)]
    pub test_size: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
    pub seed: u64,

    /// Number of trees in the forest
    #[arg(long, default_value_t = 100)]
    pub n_estimators: usize,

    /// Depth limit per tree (unlimited when omitted)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Seed for bootstrap and feature sampling (unseeded when omitted)
    #[arg(long)]
    pub forest_seed: Option<u64>,

    /// JSON TrainConfig file; replaces every other flag
    #[arg(long)]
    pub config: Option<String>,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl TryFrom<TrainArgs> for TrainConfig {
    type Error = anyhow::Error;

    fn try_from(a: TrainArgs) -> Result<Self> {
        if let Some(path) = a.config {
            return TrainConfig::from_json_file(path);
        }

        Ok(TrainConfig {
            dataset_path:  a.dataset,
            model_path:    a.model_out,
            target_column: a.target,
            test_size:     a.test_size,
            split_seed:    a.seed,
            forest: ForestParams {
                n_estimators: a.n_estimators,
                max_depth:    a.max_depth,
                seed:         a.forest_seed,
                ..ForestParams::default()
            },
        })
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// CSV file of feature rows; columns are matched by name
    #[arg(long)]
    pub input: String,

    /// Trained model file
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn train_args(argv: &[&str]) -> TrainArgs {
        match Cli::parse_from(argv).command {
            Some(Commands::Train(a)) => a,
            other => panic!("expected train, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_train_matches_defaults() {
        let cfg = TrainConfig::try_from(train_args(&["brake-model", "train"])).unwrap();
        assert_eq!(cfg, TrainConfig::default());
    }

    #[test]
    fn test_train_overrides() {
        let cfg = TrainConfig::try_from(train_args(&[
            "brake-model", "train",
            "--dataset", "d.csv",
            "--model-out", "m.bin",
            "--n-estimators", "10",
            "--max-depth", "4",
            "--forest-seed", "3",
        ]))
        .unwrap();

        assert_eq!(cfg.dataset_path, "d.csv");
        assert_eq!(cfg.model_path, "m.bin");
        assert_eq!(cfg.forest.n_estimators, 10);
        assert_eq!(cfg.forest.max_depth, Some(4));
        assert_eq!(cfg.forest.seed, Some(3));
        assert_eq!(cfg.split_seed, 42);
    }

    #[test]
    fn test_config_file_replaces_flags() {
        use std::io::Write;

        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(br#"{"model_path":"cfg.bin","split_seed":7,"forest":{"n_estimators":3}}"#)
            .unwrap();
        let path = f.path().to_str().unwrap();

        let cfg = TrainConfig::try_from(train_args(&[
            "brake-model", "train",
            "--config", path,
            "--model-out", "ignored.bin",
            "--n-estimators", "50",
        ]))
        .unwrap();

        assert_eq!(cfg.model_path, "cfg.bin");
        assert_eq!(cfg.split_seed, 7);
        assert_eq!(cfg.forest.n_estimators, 3);
        // Keys absent from the file fall back to the defaults, not the flags
        assert_eq!(cfg.dataset_path, TrainConfig::default().dataset_path);
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let args = train_args(&["brake-model", "train", "--config", path.to_str().unwrap()]);
        assert!(TrainConfig::try_from(args).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        assert!(Cli::parse_from(["brake-model"]).command.is_none());
    }

    #[test]
    fn test_predict_args() {
        match Cli::parse_from(["brake-model", "predict", "--input", "rows.csv"]).command {
            Some(Commands::Predict(a)) => {
                assert_eq!(a.input, "rows.csv");
                assert_eq!(a.model, "model.pkl");
            }
            other => panic!("expected predict, got {other:?}"),
        }
    }
}
