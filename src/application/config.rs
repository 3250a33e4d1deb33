// ============================================================
// Layer 2 — Application Configuration
// ============================================================
// Plain config structs the use cases are built from. The CLI
// converts its arguments into these, so the application layer
// never sees clap types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::batch_classifier::DEFAULT_BATCH_SIZE;
use crate::data::partitioner::ChunkLayout;

/// Where the two models live and how long their inputs may be
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Sequence classifier directory (tokenizer.json, model_config.json, model.mpk)
    pub classifier_dir: PathBuf,

    /// Token classifier directory, same layout
    pub ner_dir: PathBuf,

    /// Encodings are truncated to this many tokens
    pub max_length: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            classifier_dir: PathBuf::from("app/model/classifier"),
            ner_dir:        PathBuf::from("app/model/ner"),
            max_length:     128,
        }
    }
}

/// Settings for a full file run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub models: ModelConfig,

    /// Root directory for output artifacts and the summary CSV
    pub storage_dir: PathBuf,

    /// Texts per classifier call
    pub batch_size: usize,

    /// How output datasets are chunked
    pub layout: ChunkLayout,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            models:      ModelConfig::default(),
            storage_dir: PathBuf::from("storage"),
            batch_size:  DEFAULT_BATCH_SIZE,
            layout:      ChunkLayout::Preserve,
        }
    }
}
