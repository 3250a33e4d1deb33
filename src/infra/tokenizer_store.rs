// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the HuggingFace `tokenizer.json` that ships with each
// model directory. The same file must be used that the model
// was trained with, otherwise token ids mean nothing.
//
// For inference the tokenizer is configured to truncate to the
// model's maximum length. Padding is left to the batcher.

use anyhow::Result;
use std::path::PathBuf;
use tokenizers::{Tokenizer, TruncationParams};

pub const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the tokenizer exactly as saved
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join(TOKENIZER_FILE);
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", path.display(), e
            ))
    }

    /// Load the tokenizer and cap every encoding at `max_length` tokens
    pub fn load_for_inference(&self, max_length: usize) -> Result<Tokenizer> {
        let mut tokenizer = self.load()?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Cannot configure truncation: {e}"))?;

        tracing::info!(
            "Tokenizer loaded from '{}' (max_length={})",
            self.dir.display(),
            max_length
        );
        Ok(tokenizer)
    }
}
