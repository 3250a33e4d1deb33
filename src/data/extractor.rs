// ============================================================
// Layer 4 — Entity Extractor
// ============================================================
// Single-text keyword extraction:
//
//   raw text ─▶ normalise ─▶ tokenize + label ─▶ span decode ─▶ entities
//
// Empty text after normalisation short-circuits to no entities
// without calling the labeler.

use anyhow::{Context, Result};

use crate::data::span_decoder;
use crate::domain::entity::Entity;
use crate::domain::traits::{TextNormalizer, TokenLabeler};

pub struct EntityExtractor<L, N> {
    labeler:    L,
    normalizer: N,
}

impl<L: TokenLabeler, N: TextNormalizer> EntityExtractor<L, N> {
    pub fn new(labeler: L, normalizer: N) -> Self {
        Self { labeler, normalizer }
    }

    /// All entities of `text`, in emission order
    pub fn extract(&self, text: &str) -> Result<Vec<Entity>> {
        let cleaned = self.normalizer.normalize(text);
        if cleaned.trim().is_empty() {
            return Ok(Vec::new());
        }

        let tokens = self
            .labeler
            .label_tokens(&cleaned)
            .context("Token labelling failed")?;

        Ok(span_decoder::decode(&cleaned, &tokens)?)
    }

}

/// The keyword strings of `entities`, in emission order
pub fn keyword_texts(entities: &[Entity]) -> Vec<String> {
    entities.iter().map(|e| e.text.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::preprocessor::CommentNormalizer;
    use crate::domain::entity::{EntityType, LabeledToken};
    use crate::test_support::{IdentityNormalizer, LexiconLabeler};
    use std::cell::Cell;

    #[test]
    fn test_extracts_after_normalising() {
        let labeler   = LexiconLabeler::new(&[("judi", 3), ("bola", 4), ("hoki88", 1)]);
        let extractor = EntityExtractor::new(labeler, CommentNormalizer::new());

        let entities = extractor.extract("<b>Main judi, bola di hoki88!!</b>").unwrap();
        assert_eq!(
            entities,
            vec![
                Entity::new("judi bola", EntityType::General),
                Entity::new("hoki88", EntityType::Site),
            ]
        );
    }

    struct CountingLabeler(Cell<usize>);

    impl TokenLabeler for CountingLabeler {
        fn label_tokens(&self, _text: &str) -> Result<Vec<LabeledToken>> {
            self.0.set(self.0.get() + 1);
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_blank_text_skips_labeler() {
        let labeler   = CountingLabeler(Cell::new(0));
        let extractor = EntityExtractor::new(&labeler, IdentityNormalizer);
        assert!(extractor.extract("   \n ").unwrap().is_empty());
        assert_eq!(labeler.0.get(), 0);
    }

    #[test]
    fn test_keywords_are_entity_texts() {
        let labeler   = LexiconLabeler::new(&[("gacor", 3)]);
        let extractor = EntityExtractor::new(labeler, IdentityNormalizer);
        let entities  = extractor.extract("slot gacor").unwrap();
        assert_eq!(keyword_texts(&entities), vec!["gacor".to_string()]);
    }
}
