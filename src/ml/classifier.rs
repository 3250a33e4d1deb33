// ============================================================
// Layer 5 — Spam Classifier
// ============================================================
// Sequence classification of comment texts with the burn
// encoder + [CLS] head. Implements the SequenceClassifier trait
// the batch classifier consumes.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokenizers::Tokenizer;

use crate::data::batcher::{EncodedText, EncodingBatcher};
use crate::domain::comment::SpamLabel;
use crate::domain::traits::SequenceClassifier;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::model::{argmax_rows, SequenceClassifierModel, NUM_SEQUENCE_LABELS};
use crate::ml::{check_max_length, InferBackend};

/// Per-class probabilities of a single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub non_judol: f32,
    pub judol:     f32,
}

/// Detailed result for one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted_label: SpamLabel,
    pub label_name:      String,
    pub confidence:      f32,
    pub probabilities:   ClassProbabilities,
}

impl Prediction {
    /// Build from the softmax output [p(non-spam), p(spam)], rounded to 3 decimals
    pub fn from_probabilities(non_spam: f32, spam: f32) -> Self {
        let label = if spam > non_spam { SpamLabel::Spam } else { SpamLabel::NonSpam };
        let confidence = match label {
            SpamLabel::Spam    => spam,
            SpamLabel::NonSpam => non_spam,
        };
        Self {
            predicted_label: label,
            label_name:      label.name().to_string(),
            confidence:      round3(confidence),
            probabilities:   ClassProbabilities {
                non_judol: round3(non_spam),
                judol:     round3(spam),
            },
        }
    }
}

fn round3(x: f32) -> f32 {
    (x * 1000.0).round() / 1000.0
}

pub struct SpamClassifier {
    model:     SequenceClassifierModel<InferBackend>,
    tokenizer: Tokenizer,
    batcher:   EncodingBatcher<InferBackend>,
}

impl SpamClassifier {
    /// Load tokenizer, config and weights from one model directory
    pub fn from_dir(dir: &Path, max_length: usize) -> Result<Self> {
        let device = burn::backend::wgpu::WgpuDevice::default();
        let ckpt   = CheckpointManager::new(dir);
        let cfg    = ckpt.load_config()?;
        check_max_length(&cfg, max_length)?;
        anyhow::ensure!(
            cfg.num_labels == NUM_SEQUENCE_LABELS,
            "Classifier in '{}' has {} labels, expected {}",
            dir.display(),
            cfg.num_labels,
            NUM_SEQUENCE_LABELS
        );

        let model = cfg.init_sequence_classifier::<InferBackend>(&device);
        let model = ckpt.load_weights::<InferBackend, _>(model, &device)?;
        let tokenizer = TokenizerStore::new(dir).load_for_inference(max_length)?;

        tracing::info!("Classifier loaded from '{}'", dir.display());
        Ok(Self { model, tokenizer, batcher: EncodingBatcher::new(device) })
    }

    /// Softmax probabilities, one row of `num_labels` per text
    fn probabilities(&self, texts: &[String]) -> Result<(Vec<f32>, usize)> {
        let inputs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let encodings = self
            .tokenizer
            .encode_batch(inputs, true)
            .map_err(|e| anyhow::anyhow!("Tokenise batch: {e}"))?;

        let items: Vec<EncodedText> = encodings
            .iter()
            .map(|enc| EncodedText::new(enc.get_ids().to_vec(), enc.get_attention_mask().to_vec()))
            .collect();
        let batch = self.batcher.batch(&items);

        let logits = self.model.forward(batch.input_ids, batch.attention_mask);
        let [_, num_labels] = logits.dims();
        let probs = burn::tensor::activation::softmax(logits, 1)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Read classifier output: {e:?}"))?;

        Ok((probs, num_labels))
    }

    /// Full prediction for a single, already normalised text
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let (probs, num_labels) = self
            .probabilities(&[text.to_string()])
            .context("Classifier forward pass failed")?;
        anyhow::ensure!(
            num_labels == NUM_SEQUENCE_LABELS,
            "Expected a binary classifier, got {num_labels} labels"
        );
        Ok(Prediction::from_probabilities(probs[0], probs[1]))
    }
}

impl SequenceClassifier for SpamClassifier {
    fn classify_batch(&self, texts: &[String]) -> Result<Vec<i64>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let (probs, num_labels) = self.probabilities(texts)?;
        Ok(argmax_rows(&probs, num_labels)
            .into_iter()
            .map(|i| i as i64)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_from_probabilities() {
        let p = Prediction::from_probabilities(0.12345, 0.87655);
        assert_eq!(p.predicted_label, SpamLabel::Spam);
        assert_eq!(p.label_name, "Judol");
        assert_eq!(p.confidence, 0.877);
        assert_eq!(p.probabilities.non_judol, 0.123);

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["predicted_label"], 1);
    }

    #[test]
    fn test_rejects_classifier_with_wrong_label_count() {
        use crate::infra::checkpoint::CONFIG_FILE;
        use crate::ml::model::EncoderConfig;

        let dir = tempfile::TempDir::new().unwrap();
        let cfg = EncoderConfig::new(50, 16, 8, 2, 1, 16, 3);
        std::fs::write(dir.path().join(CONFIG_FILE), serde_json::to_string(&cfg).unwrap()).unwrap();

        let Err(err) = SpamClassifier::from_dir(dir.path(), 16) else {
            panic!("a 3-label classifier must be rejected");
        };
        assert!(err.to_string().contains("has 3 labels, expected 2"));
    }

    #[test]
    fn test_tie_goes_to_non_spam() {
        let p = Prediction::from_probabilities(0.5, 0.5);
        assert_eq!(p.predicted_label, SpamLabel::NonSpam);
        assert_eq!(p.label_name, "Non-Judol");
    }
}
