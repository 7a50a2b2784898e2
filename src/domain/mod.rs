// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits that define the core concepts
// of the system: the raw table, the feature matrix, the target
// vector, and the abstractions other layers implement.
//
// Rules for this layer:
//   - NO file I/O
//   - NO tree / forest code
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// The raw CSV table as loaded from disk
pub mod table;

// Numeric feature matrix and label vector derived from the table
pub mod matrix;

// Core abstractions (traits) that other layers implement
pub mod traits;
