// ============================================================
// Layer 4 — Batch Classifier
// ============================================================
// Classifies an arbitrary number of texts by feeding the model
// fixed-size windows, one call per window:
//
//   texts:   t0 t1 t2 t3 t4 t5 t6      batch_size = 3
//   calls:   [t0 t1 t2] [t3 t4 t5] [t6]
//   result:  l0 l1 l2   l3 l4 l5   l6
//
// Whatever the model does inside a call (padding, truncation)
// is its own business. This component only guarantees that every
// text gets exactly one label, in input order.

use anyhow::Result;

use crate::domain::comment::SpamLabel;
use crate::domain::error::PipelineError;
use crate::domain::traits::SequenceClassifier;

pub const DEFAULT_BATCH_SIZE: usize = 16;

pub struct BatchClassifier<'a, C: SequenceClassifier + ?Sized> {
    classifier: &'a C,
    batch_size: usize,
}

impl<'a, C: SequenceClassifier + ?Sized> BatchClassifier<'a, C> {
    /// # Panics
    /// Panics if `batch_size` is zero, since no window could make progress
    pub fn new(classifier: &'a C, batch_size: usize) -> Self {
        assert!(batch_size > 0, "batch_size must be at least 1");
        Self { classifier, batch_size }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// One label per text, same length and order as `texts`
    pub fn classify(&self, texts: &[String]) -> Result<Vec<SpamLabel>> {
        let mut labels = Vec::with_capacity(texts.len());

        for window in texts.chunks(self.batch_size) {
            let ids = self.classifier.classify_batch(window)?;
            if ids.len() != window.len() {
                return Err(PipelineError::BatchLengthMismatch {
                    expected: window.len(),
                    actual:   ids.len(),
                }
                .into());
            }

            for id in ids {
                labels.push(SpamLabel::try_from(id)?);
            }
        }

        tracing::debug!(
            "Classified {} texts in {} batches",
            texts.len(),
            texts.len().div_ceil(self.batch_size)
        );
        Ok(labels)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FnClassifier;

    fn texts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("t{i}")).collect()
    }

    #[test]
    fn test_windows_cover_all_inputs_in_order() {
        // Odd-numbered texts are spam
        let model = FnClassifier::new(|t: &str| t[1..].parse::<i64>().unwrap() % 2);
        let bc    = BatchClassifier::new(&model, 3);

        let labels = bc.classify(&texts(7)).unwrap();
        assert_eq!(labels.len(), 7);
        assert_eq!(labels[0], SpamLabel::NonSpam);
        assert_eq!(labels[1], SpamLabel::Spam);
        assert_eq!(labels[6], SpamLabel::NonSpam);
        assert_eq!(model.batch_sizes(), vec![3, 3, 1]);
        assert_eq!(model.batches.borrow()[2], vec!["t6".to_string()]);
    }

    #[test]
    fn test_default_batch_size_is_sixteen() {
        let model = FnClassifier::new(|_: &str| 0);
        let bc    = BatchClassifier::new(&model, DEFAULT_BATCH_SIZE);
        bc.classify(&texts(40)).unwrap();
        assert_eq!(model.batch_sizes(), vec![16, 16, 8]);
    }

    #[test]
    fn test_empty_input_makes_no_calls() {
        let model = FnClassifier::new(|_: &str| 1);
        let bc    = BatchClassifier::new(&model, 4);
        assert!(bc.classify(&[]).unwrap().is_empty());
        assert!(model.batch_sizes().is_empty());
    }

    #[test]
    fn test_unknown_class_is_rejected() {
        let model = FnClassifier::new(|_: &str| 3);
        let bc    = BatchClassifier::new(&model, 4);
        let err   = bc.classify(&texts(2)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::UnknownClassId(3))
        ));
    }

    struct ShortClassifier;

    impl SequenceClassifier for ShortClassifier {
        fn classify_batch(&self, texts: &[String]) -> Result<Vec<i64>> {
            Ok(vec![0; texts.len().saturating_sub(1)])
        }
    }

    #[test]
    fn test_short_reply_is_a_contract_violation() {
        let bc  = BatchClassifier::new(&ShortClassifier, 4);
        let err = bc.classify(&texts(3)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::BatchLengthMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    #[should_panic]
    fn test_zero_batch_size_panics() {
        let model = FnClassifier::new(|_: &str| 0);
        let _ = BatchClassifier::new(&model, 0);
    }
}
