// ============================================================
// Layer 3 — Core Traits (Collaborator Abstractions)
// ============================================================
// The predictive models and the text cleaner are collaborators
// the pipeline consumes through these traits. The ML layer
// provides the real implementations (burn + tokenizers); tests
// provide deterministic fakes. Nothing in the data layer knows
// which one it is talking to.

use anyhow::Result;

use crate::domain::comment::Dataset;
use crate::domain::entity::LabeledToken;

// ─── SequenceClassifier ───────────────────────────────────────────────────────
/// Maps each text to a class id (0 = non-spam, 1 = spam).
///
/// Implementations:
///   - SpamClassifier → burn sequence classification model
pub trait SequenceClassifier {
    /// Must return exactly one id per input text, in input order.
    /// Padding / truncation inside the call is up to the implementation.
    fn classify_batch(&self, texts: &[String]) -> Result<Vec<i64>>;
}

// ─── TokenLabeler ─────────────────────────────────────────────────────────────
/// Tokenizes a cleaned text with offsets and tags every token.
///
/// Implementations:
///   - KeywordTagger → tokenizers + burn token classification model
pub trait TokenLabeler {
    /// Special and padding tokens are returned with `offset = None`.
    fn label_tokens(&self, text: &str) -> Result<Vec<LabeledToken>>;
}

// ─── TextNormalizer ───────────────────────────────────────────────────────────
/// Cleans raw comment text before it reaches either model.
/// Implementations must be idempotent.
pub trait TextNormalizer {
    fn normalize(&self, text: &str) -> String;
}

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Anything that can produce a chunked comment dataset.
///
/// Implementations:
///   - JsonDatasetLoader → reads a dataset JSON file
pub trait DatasetSource {
    fn load(&self) -> Result<Dataset>;
}

impl<T: SequenceClassifier + ?Sized> SequenceClassifier for &T {
    fn classify_batch(&self, texts: &[String]) -> Result<Vec<i64>> {
        (**self).classify_batch(texts)
    }
}

impl<T: TokenLabeler + ?Sized> TokenLabeler for &T {
    fn label_tokens(&self, text: &str) -> Result<Vec<LabeledToken>> {
        (**self).label_tokens(text)
    }
}

impl<T: TextNormalizer + ?Sized> TextNormalizer for &T {
    fn normalize(&self, text: &str) -> String {
        (**self).normalize(text)
    }
}
