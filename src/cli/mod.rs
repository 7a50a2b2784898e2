// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// The entry point for all user interaction, parsed with clap.
// All business logic is delegated to Layer 2 (application).
//
//   (no subcommand) — train with the built-in defaults:
//                     brake_failure_updated_dataset.csv → model.pkl
//   `train`         — same pipeline, with overrides
//   `predict`       — load a model and label the rows of a CSV
//
// stdout carries only results; progress goes through tracing.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs};

use crate::application::train_use_case::TrainConfig;

#[derive(Parser, Debug)]
#[command(
    name = "brake-model",
    version,
    about = "Train a random-forest brake-failure classifier from a CSV dataset."
)]
pub struct Cli {
    /// What to run; training with defaults when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Dispatch to the matching use case. Routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            None                          => run_train(TrainConfig::default()),
            Some(Commands::Train(args))   => run_train(args.try_into()?),
            Some(Commands::Predict(args)) => run_predict(args),
        }
    }
}

/// Handles training. Prints the confirmation line on success.
fn run_train(config: TrainConfig) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let report = TrainUseCase::new(config).execute()?;
    tracing::info!(
        "Trained on {} rows ({} held out), {} features",
        report.n_train,
        report.n_test,
        report.n_features
    );

    println!("✅ Model trained and saved as {}", report.model_path);
    Ok(())
}

/// Handles the `predict` subcommand. One label per line.
fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let use_case = PredictUseCase::new(&args.model)?;
    for label in use_case.predict_file(&args.input)? {
        println!("{label}");
    }
    Ok(())
}
