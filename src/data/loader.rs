// ============================================================
// Layer 4 — CSV Loader
// ============================================================
// Loads a comma-separated file with a header row into a
// DataTable using the `csv` crate.
//
// Loading rules:
//   - The first record is the header row (required)
//   - Every cell is trimmed of surrounding whitespace
//   - Every data row must have as many fields as the header;
//     the csv reader rejects ragged rows on its own
//   - A missing or unreadable file is a hard error and the
//     pipeline stops here
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::domain::table::DataTable;
use crate::domain::traits::TableSource;

/// Reads one CSV file into a DataTable.
/// Implements the TableSource trait from Layer 3.
pub struct CsvLoader {
    /// Path to the .csv file
    path: PathBuf,
}

impl CsvLoader {
    /// Create a new CsvLoader pointed at a file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl TableSource for CsvLoader {
    fn load_table(&self) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("Cannot open dataset '{}'", self.path.display()))?;

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("Cannot read header row of '{}'", self.path.display()))?
            .iter()
            .map(str::to_string)
            .collect();

        // An empty file yields an empty header record
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            bail!("Dataset '{}' has no header row", self.path.display());
        }

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            // +2: one for the header, one because lines are 1-based
            let record = record.with_context(|| {
                format!("Malformed row at line {} of '{}'", i + 2, self.path.display())
            })?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        tracing::debug!(
            "Read {} rows x {} columns from '{}'",
            rows.len(),
            headers.len(),
            self.path.display()
        );

        Ok(DataTable::new(headers, rows))
    }
}
