// ============================================================
// Layer 3 — DataTable Domain Type
// ============================================================
// Represents a delimited file loaded from disk: one header row
// of column names plus rows of raw string cells.
//
// No type conversion happens here. Turning cells into numbers
// is the preprocessor's job (Layer 4).
//
// Reference: Rust Book §5 (Structs and Methods)
//            Rust Book §8 (Vectors)

/// A raw table of string cells with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column names, in file order
    pub headers: Vec<String>,

    /// One Vec per data row, each the same length as `headers`
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a table from headers and rows.
    ///
    /// Example:
    ///   let t = DataTable::new(vec!["speed", "failure"], vec![vec!["1.0", "0"]]);
    pub fn new<H, R, C>(headers: Vec<H>, rows: Vec<R>) -> Self
    where
        H: Into<String>,
        R: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows:    rows
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Number of data rows (header excluded)
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    /// Position of the column called `name`, if present
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_and_lookup() {
        let t = DataTable::new(
            vec!["pressure", "temp", "failure"],
            vec![vec!["1", "2", "0"], vec!["3", "4", "1"]],
        );
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.n_cols(), 3);
        assert_eq!(t.column_index("failure"), Some(2));
        assert_eq!(t.column_index("missing"), None);
    }
}
