// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Reads a chunked comment dataset from a JSON file:
//
//   { "chunks": [ { "chunk_id": 1, "comments": [ { "text": "..." } ] } ] }
//
// Missing `chunks`, `comments` or `text` keys (or a file that is
// not JSON at all) is an InputFormat error and aborts the run.
// Totals in the file, if any, are ignored and recomputed.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::comment::Dataset;
use crate::domain::error::PipelineError;
use crate::domain::traits::DatasetSource;

pub struct JsonDatasetLoader {
    path: PathBuf,
}

impl JsonDatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for JsonDatasetLoader {
    fn load(&self) -> Result<Dataset> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read dataset '{}'", self.path.display()))?;

        let dataset = parse_dataset(&raw)
            .with_context(|| format!("Cannot parse dataset '{}'", self.path.display()))?;

        tracing::info!(
            "Loaded '{}': {} comments in {} chunks",
            self.path.display(),
            dataset.total_comments(),
            dataset.total_chunks()
        );
        Ok(dataset)
    }
}

/// Parse dataset JSON held in memory
pub fn parse_dataset(raw: &str) -> Result<Dataset, PipelineError> {
    serde_json::from_str(raw).map_err(PipelineError::input_format)
}
