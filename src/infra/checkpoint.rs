// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Restores a model from its directory using burn's CompactRecorder.
//
// Every model directory looks like:
//
//   app/model/classifier/
//     model_config.json   ← EncoderConfig (architecture)
//     model.mpk           ← weights, burn CompactRecorder format
//     tokenizer.json      ← see tokenizer_store.rs
//
// The architecture must be rebuilt from the config before the
// weights can be loaded into it. Loading fails loudly if the
// two do not match.

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use std::{fs, path::PathBuf};

use crate::ml::model::EncoderConfig;

pub const CONFIG_FILE: &str = "model_config.json";

/// Weight file stem; the recorder appends its own extension
pub const WEIGHTS_STEM: &str = "model";

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read the model architecture from `model_config.json`
    pub fn load_config(&self) -> Result<EncoderConfig> {
        let path = self.dir.join(CONFIG_FILE);

        let json = fs::read_to_string(&path).with_context(|| {
            format!("Cannot read model config from '{}'", path.display())
        })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Invalid model config in '{}'", path.display()))
    }

    /// Load the saved weights into a freshly initialised `module`
    pub fn load_weights<B, M>(&self, module: M, device: &B::Device) -> Result<M>
    where
        B: Backend,
        M: Module<B>,
    {
        let path     = self.dir.join(WEIGHTS_STEM);
        let recorder = CompactRecorder::new();

        let record: M::Record = Recorder::<B>::load(&recorder, path.clone(), device)
            .with_context(|| format!("Cannot load weights '{}'", path.display()))?;

        tracing::debug!("Loaded weights from '{}'", path.display());
        Ok(module.load_record(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_loads_config() {
        let dir = TempDir::new().unwrap();
        let cfg = EncoderConfig::new(30522, 128, 64, 4, 2, 256, 5);
        fs::write(dir.path().join(CONFIG_FILE), serde_json::to_string(&cfg).unwrap()).unwrap();

        let loaded = CheckpointManager::new(dir.path()).load_config().unwrap();
        assert_eq!(loaded.vocab_size, 30522);
        assert_eq!(loaded.num_labels, 5);
    }

    #[test]
    fn test_missing_config_names_the_file() {
        let dir = TempDir::new().unwrap();
        let err = CheckpointManager::new(dir.path()).load_config().unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_missing_weights_is_an_error() {
        type B = burn::backend::NdArray;
        let dir    = TempDir::new().unwrap();
        let device = Default::default();
        let model  = EncoderConfig::new(20, 8, 4, 1, 1, 8, 2).init_token_classifier::<B>(&device);
        let result = CheckpointManager::new(dir.path()).load_weights::<B, _>(model, &device);
        assert!(result.is_err());
    }
}
