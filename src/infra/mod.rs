// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Concerns that touch the disk but belong to no business layer:
//
//   model_store.rs — Saving and loading the fitted forest.
//                    The RandomForestClassifier is written
//                    with bincode to a single file (model.pkl
//                    by default) and read back for `predict`.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Model artifact saving and loading
pub mod model_store;
