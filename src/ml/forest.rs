// ============================================================
// Layer 5 — Random Forest Classifier
// ============================================================
// An ensemble of CART trees (see tree.rs), each grown on its own
// bootstrap sample with a random feature subset per split.
//
// Defaults:
//   n_estimators      = 100
//   max_depth         = None (grow until pure / unsplittable)
//   min_samples_split = 2
//   min_samples_leaf  = 1
//   max_features      = sqrt(n_features)
//   bootstrap         = true
//   seed              = None → drawn from the thread RNG, so two
//                       fits on the same data give different trees
//
// Prediction:
//   Average the class distributions of every tree's leaf,
//   then pick the class with the highest mean probability.
//
// Feature importance (mean decrease in impurity):
//   Per tree, the weighted Gini decrease credited to each
//   feature, normalised to sum to 1; averaged over trees and
//   normalised again.
//
// The whole struct is serde-serialisable — the artifact on disk
// is exactly this value.
//
// Reference: Breiman (2001) Random Forests

use anyhow::{bail, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::matrix::{FeatureMatrix, TargetVector};
use crate::domain::traits::Classifier;
use crate::ml::tree::{DecisionTree, TreeParams};

/// How many features to consider at each split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    /// floor(sqrt(n_features)), at least 1
    Sqrt,
    /// floor(log2(n_features)), at least 1
    Log2,
    /// Every feature
    All,
    /// A fixed count, clamped to n_features
    Count(usize),
    /// A fraction of n_features, at least 1
    Fraction(f64),
}

impl MaxFeatures {
    /// Resolve to a concrete count for `n_features` columns
    pub fn resolve(&self, n_features: usize) -> usize {
        let n = n_features as f64;
        let k = match *self {
            MaxFeatures::Sqrt        => n.sqrt() as usize,
            MaxFeatures::Log2        => n.log2() as usize,
            MaxFeatures::All         => n_features,
            MaxFeatures::Count(c)    => c,
            MaxFeatures::Fraction(f) => (f * n) as usize,
        };
        k.clamp(1, n_features.max(1))
    }
}

/// Forest hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    pub n_estimators:      usize,
    pub max_depth:         Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf:  usize,
    pub max_features:      MaxFeatures,
    pub bootstrap:         bool,
    /// None = unseeded, trees differ run to run
    pub seed:              Option<u64>,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators:      100,
            max_depth:         None,
            min_samples_split: 2,
            min_samples_leaf:  1,
            max_features:      MaxFeatures::Sqrt,
            bootstrap:         true,
            seed:              None,
        }
    }
}

impl ForestParams {
    /// Reject settings that cannot grow a tree
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            bail!("n_estimators must be at least 1");
        }
        if self.min_samples_split < 2 {
            bail!("min_samples_split must be at least 2, got {}", self.min_samples_split);
        }
        if self.min_samples_leaf < 1 {
            bail!("min_samples_leaf must be at least 1");
        }
        if self.max_depth == Some(0) {
            bail!("max_depth must be at least 1 when set");
        }
        if let MaxFeatures::Fraction(f) = self.max_features {
            if !(f > 0.0 && f <= 1.0) {
                bail!("max_features fraction must be in (0, 1], got {}", f);
            }
        }
        if self.max_features == MaxFeatures::Count(0) {
            bail!("max_features count must be at least 1");
        }
        Ok(())
    }
}

/// A fitted random forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    params:              ForestParams,
    classes:             Vec<String>,
    feature_names:       Vec<String>,
    trees:               Vec<DecisionTree>,
    feature_importances: Vec<f64>,
}

impl RandomForestClassifier {
    /// Fit a forest on X / y.
    ///
    /// # Errors
    /// Invalid params, empty X, zero features, or X/y length mismatch.
    pub fn fit(params: ForestParams, x: &FeatureMatrix, y: &TargetVector) -> Result<Self> {
        params.validate()?;

        if x.n_rows() == 0 || y.is_empty() {
            bail!("Cannot fit a forest on an empty training set");
        }
        if x.n_features() == 0 {
            bail!("Cannot fit a forest without feature columns");
        }
        if x.n_rows() != y.len() {
            bail!("X has {} rows but y has {} labels", x.n_rows(), y.len());
        }

        let classes = y.classes();
        if classes.len() < 2 {
            tracing::warn!(
                "Target has a single class ({:?}) — every prediction will be that class",
                classes
            );
        }
        // Every label is in `classes` by construction
        let y_idx: Vec<usize> = y
            .encode(&classes)
            .into_iter()
            .map(|c| c.unwrap_or(0))
            .collect();

        let n_samples  = x.n_rows();
        let n_features = x.n_features();
        let tree_params = TreeParams {
            max_depth:         params.max_depth,
            min_samples_split: params.min_samples_split,
            min_samples_leaf:  params.min_samples_leaf,
            max_features:      params.max_features.resolve(n_features),
        };

        let seed = params.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut trees            = Vec::with_capacity(params.n_estimators);
        let mut importance_sum   = vec![0.0; n_features];

        for t in 0..params.n_estimators {
            let (weights, samples) = if params.bootstrap {
                bootstrap_weights(n_samples, &mut rng)
            } else {
                (vec![1.0; n_samples], (0..n_samples).collect())
            };

            let (tree, raw) = DecisionTree::fit(
                &x.rows,
                &y_idx,
                &weights,
                samples,
                classes.len(),
                &tree_params,
                &mut rng,
            );

            let total: f64 = raw.iter().sum();
            if total > 0.0 {
                for (acc, r) in importance_sum.iter_mut().zip(&raw) {
                    *acc += r / total;
                }
            }

            tracing::debug!(
                "Tree {}/{}: {} nodes, depth {}",
                t + 1,
                params.n_estimators,
                tree.nodes().len(),
                tree.depth()
            );
            trees.push(tree);
        }

        let total: f64 = importance_sum.iter().sum();
        let feature_importances = if total > 0.0 {
            importance_sum.iter().map(|v| v / total).collect()
        } else {
            vec![0.0; n_features]
        };

        Ok(Self {
            params,
            classes,
            feature_names: x.feature_names.clone(),
            trees,
            feature_importances,
        })
    }

    /// Mean class distribution over all trees, ordered like `classes()`
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.feature_names.len() {
            bail!(
                "Expected {} features, got {}",
                self.feature_names.len(),
                row.len()
            );
        }

        let mut mean = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (m, p) in mean.iter_mut().zip(tree.predict_proba(row)) {
                *m += p;
            }
        }
        let n = self.trees.len() as f64;
        mean.iter_mut().for_each(|m| *m /= n);
        Ok(mean)
    }

    /// Predict the label of every row of `x`
    pub fn predict_matrix(&self, x: &FeatureMatrix) -> Result<Vec<String>> {
        x.rows.iter().map(|row| self.predict(row)).collect()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }
}

impl Classifier for RandomForestClassifier {
    fn predict(&self, features: &[f64]) -> Result<String> {
        let proba = self.predict_proba(features)?;

        // Argmax; ties go to the lowest class index
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        Ok(self.classes[best].clone())
    }
}

/// Draw `n` rows with replacement. Returns (weight per row, rows with weight > 0).
fn bootstrap_weights<R: Rng>(n: usize, rng: &mut R) -> (Vec<f64>, Vec<usize>) {
    let mut weights = vec![0.0; n];
    for _ in 0..n {
        weights[rng.gen_range(0..n)] += 1.0;
    }
    let samples = (0..n).filter(|&i| weights[i] > 0.0).collect();
    (weights, samples)
}
