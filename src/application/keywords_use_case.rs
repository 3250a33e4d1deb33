// ============================================================
// Layer 2 — Keywords Use Case
// ============================================================
// Mines ranked keywords from a spam dataset that was already
// written by an earlier `predict-file` run, and stores them as a
// new keywords artifact.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::application::config::ModelConfig;
use crate::data::{
    aggregator::KeywordAggregator, extractor::EntityExtractor, loader::JsonDatasetLoader,
    preprocessor::CommentNormalizer,
};
use crate::domain::traits::DatasetSource;
use crate::infra::storage::{ArtifactKind, ArtifactStore};
use crate::ml::tagger::KeywordTagger;

pub struct KeywordsUseCase {
    models:      ModelConfig,
    storage_dir: PathBuf,
}

impl KeywordsUseCase {
    pub fn new(models: ModelConfig, storage_dir: PathBuf) -> Self {
        Self { models, storage_dir }
    }

    /// Returns the path of the written keyword file
    pub fn execute(&self, spam_file: &Path) -> Result<PathBuf> {
        let spam   = JsonDatasetLoader::new(spam_file).load()?;
        let tagger = KeywordTagger::from_dir(&self.models.ner_dir, self.models.max_length)?;

        let aggregator = KeywordAggregator::new(EntityExtractor::new(tagger, CommentNormalizer::new()));
        let keywords   = aggregator.aggregate(&spam)?;

        let store = ArtifactStore::open(&self.storage_dir)?;
        let path  = store.write(ArtifactKind::Keywords, &keywords)?;
        tracing::info!("{} keywords written to '{}'", keywords.len(), path.display());
        Ok(path)
    }
}
