// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL burn and tokenizers specific code.
// The data layer reaches it only through the SequenceClassifier
// and TokenLabeler traits.
//
//   model.rs      — transformer encoder with a sequence head
//                   (spam / non-spam) and a token head (BIO)
//
//   classifier.rs — SpamClassifier: batch tokenisation, forward
//                   pass, argmax; single-text prediction with
//                   probabilities
//
//   tagger.rs     — KeywordTagger: per-token labels with offsets
//
// Weights are produced elsewhere; this crate only runs inference.

use anyhow::Result;

use crate::ml::model::EncoderConfig;

/// Encoder model architecture
pub mod model;

/// Sequence classifier collaborator
pub mod classifier;

/// Token labeler collaborator
pub mod tagger;

pub type InferBackend = burn::backend::Wgpu;

/// Truncation beyond the position table would index out of bounds
pub(crate) fn check_max_length(cfg: &EncoderConfig, max_length: usize) -> Result<()> {
    anyhow::ensure!(
        max_length > 0 && max_length <= cfg.max_seq_len,
        "max_length {} must be between 1 and the model's max_seq_len {}",
        max_length,
        cfg.max_seq_len
    );
    Ok(())
}
