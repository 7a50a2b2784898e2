// ============================================================
// Layer 5 — Trainer
// ============================================================
// Fits the forest on the training partition only.
// No evaluation happens here or anywhere else: the test
// partition is never scored.
//
// Reference: Breiman (2001) Random Forests

use anyhow::{Context, Result};

use crate::domain::matrix::{FeatureMatrix, TargetVector};
use crate::ml::forest::{ForestParams, RandomForestClassifier};

pub fn run_training(
    params:  &ForestParams,
    x_train: &FeatureMatrix,
    y_train: &TargetVector,
) -> Result<RandomForestClassifier> {
    tracing::info!(
        "Fitting random forest: {} trees, max_depth={:?}, max_features={:?}, seed={:?}",
        params.n_estimators,
        params.max_depth,
        params.max_features,
        params.seed,
    );

    let model = RandomForestClassifier::fit(params.clone(), x_train, y_train)
        .context("Random forest training failed")?;

    let total_leaves: usize = model.trees().iter().map(|t| t.n_leaves()).sum();
    tracing::info!(
        "Forest ready: {} classes {:?}, {} trees, {} leaves",
        model.classes().len(),
        model.classes(),
        model.trees().len(),
        total_leaves
    );

    for (name, imp) in model.feature_names().iter().zip(model.feature_importances()) {
        tracing::debug!("importance {:>24}: {:.4}", name, imp);
    }

    Ok(model)
}
