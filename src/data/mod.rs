// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the CSV file on disk to train/test partitions.
//
//   brake_failure_updated_dataset.csv
//       │
//       ▼
//   CsvLoader         → reads the file into a DataTable
//       │
//       ▼
//   split_target      → X (numeric features) and y (labels)
//       │
//       ▼
//   train_test_split  → X_train, X_test, y_train, y_test
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads a CSV file with a header row
pub mod loader;

/// Separates the target column from numeric features
pub mod preprocessor;

/// Seeded train/test partitioning
pub mod splitter;
