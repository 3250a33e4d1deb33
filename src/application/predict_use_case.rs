// ============================================================
// Layer 2 — Single Text Use Cases
// ============================================================
// Classify one text, or extract the keywords of one text.
// Each use case loads only the model it needs.

use anyhow::Result;
use serde::Serialize;

use crate::application::config::ModelConfig;
use crate::data::{
    extractor::{keyword_texts, EntityExtractor},
    preprocessor::CommentNormalizer,
};
use crate::domain::entity::Entity;
use crate::domain::traits::{TextNormalizer, TokenLabeler};
use crate::ml::{
    classifier::{Prediction, SpamClassifier},
    tagger::KeywordTagger,
};

// ─── PredictUseCase ───────────────────────────────────────────────────────────
pub struct PredictUseCase {
    classifier: SpamClassifier,
    normalizer: CommentNormalizer,
}

impl PredictUseCase {
    pub fn new(models: &ModelConfig) -> Result<Self> {
        let classifier = SpamClassifier::from_dir(&models.classifier_dir, models.max_length)?;
        Ok(Self { classifier, normalizer: CommentNormalizer::new() })
    }

    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let cleaned = self.normalizer.normalize(text);
        self.classifier.predict(&cleaned)
    }
}

// ─── ExtractUseCase ───────────────────────────────────────────────────────────
/// Response for a single-text extraction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub text:     String,
    pub entities: Vec<Entity>,
    pub keywords: Vec<String>,
}

pub struct ExtractUseCase<L, N> {
    extractor: EntityExtractor<L, N>,
}

impl ExtractUseCase<KeywordTagger, CommentNormalizer> {
    pub fn from_models(models: &ModelConfig) -> Result<Self> {
        let tagger = KeywordTagger::from_dir(&models.ner_dir, models.max_length)?;
        Ok(Self::new(EntityExtractor::new(tagger, CommentNormalizer::new())))
    }
}

impl<L: TokenLabeler, N: TextNormalizer> ExtractUseCase<L, N> {
    pub fn new(extractor: EntityExtractor<L, N>) -> Self {
        Self { extractor }
    }

    pub fn extract(&self, text: &str) -> Result<Extraction> {
        let entities = self.extractor.extract(text)?;
        let keywords = keyword_texts(&entities);
        Ok(Extraction {
            text: text.to_string(),
            entities,
            keywords,
        })
    }
}
