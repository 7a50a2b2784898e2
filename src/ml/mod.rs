// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// All tree and ensemble code lives here.
//
//   tree.rs       — CART classification tree on Gini impurity,
//                   stored as a flat node arena
//
//   forest.rs     — Random forest: bootstrap sampling, random
//                   feature subsets, probability averaging,
//                   feature importances
//
//   trainer.rs    — Fits the forest on the training partition
//
//   inferencer.rs — Loads a saved forest and predicts labels
//                   for a raw table, matching columns by name
//
// Reference: Breiman (2001) Random Forests

/// CART decision tree
pub mod tree;

/// Random forest classifier and its hyperparameters
pub mod forest;

/// Fits the forest on the training partition
pub mod trainer;

/// Inference engine — loads the artifact and predicts labels
pub mod inferencer;
