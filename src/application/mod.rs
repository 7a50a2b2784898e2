// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training or predicting).
//
// Rules for this layer:
//   - No tree / forest math here
//   - No printing here (that's Layer 1)
//   - No direct file parsing (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Rust Book §7 (Module System)

// The training workflow: load → split → fit → save
pub mod train_use_case;

// Load a saved model and predict labels for a CSV file
pub mod predict_use_case;
