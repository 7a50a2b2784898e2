// ============================================================
// Layer 6 — Model Store
// ============================================================
// Saves and restores the fitted forest as a single bincode file.
//
// What gets saved:
//   The whole RandomForestClassifier value — parameters, class
//   list, feature names, every tree's node arena, and the
//   feature importances. Nothing else is needed to predict.
//
// Write semantics:
//   - The file is truncated and rewritten on every save
//   - No temp file + rename, so a crash mid-write leaves a
//     partial file behind
//   - No format version or checksum; an artifact is only
//     guaranteed to load with the build that wrote it
//
// Reference: bincode crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::traits::Persistable;
use crate::ml::forest::RandomForestClassifier;

/// Owns the artifact path and delegates to the model's Persistable impl.
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, model: &RandomForestClassifier) -> Result<()> {
        model.save(&self.path)?;
        tracing::debug!("Saved model to '{}'", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<RandomForestClassifier> {
        RandomForestClassifier::load(&self.path)
    }
}

impl Persistable for RandomForestClassifier {
    fn save(&self, path: &Path) -> Result<()> {
        // File::create truncates an existing file
        let file = File::create(path)
            .with_context(|| format!("Cannot create model file '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);

        bincode::serialize_into(&mut writer, self)
            .with_context(|| format!("Failed to serialise model to '{}'", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush model file '{}'", path.display()))?;
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| {
            format!(
                "Cannot open model file '{}'. Have you run 'train' first?",
                path.display()
            )
        })?;

        bincode::deserialize_from(BufReader::new(file))
            .with_context(|| format!("'{}' is not a valid model file", path.display()))
    }
}
