// ============================================================
// Layer 3 — Tokens, BIO Labels and Entities
// ============================================================
// The token classifier tags every sub-word token with one of
// five label ids (BIO scheme over two entity types):
//
//   0 → O           outside any entity
//   1 → B-SITE      first token of a site / domain name
//   2 → I-SITE      continuation of a site entity
//   3 → B-GENERAL   first token of any other keyword
//   4 → I-GENERAL   continuation of a general keyword
//
// The set is closed: any other id is a contract violation
// of the labeler and is reported, never guessed.
//
// Offsets are byte positions into the *cleaned* text the
// model saw. Special tokens ([CLS], [SEP], [PAD]) have none.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::PipelineError;

/// WordPiece marks a sub-word that glues onto the previous piece
pub const CONTINUATION_PREFIX: &str = "##";

// ─── EntityType ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    Site,
    General,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Site    => "SITE",
            EntityType::General => "GENERAL",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── BioLabel ─────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BioLabel {
    Outside,
    Begin(EntityType),
    Inside(EntityType),
}

impl TryFrom<u32> for BioLabel {
    type Error = PipelineError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(BioLabel::Outside),
            1 => Ok(BioLabel::Begin(EntityType::Site)),
            2 => Ok(BioLabel::Inside(EntityType::Site)),
            3 => Ok(BioLabel::Begin(EntityType::General)),
            4 => Ok(BioLabel::Inside(EntityType::General)),
            other => Err(PipelineError::UnknownLabelId(other)),
        }
    }
}

// ─── Token ────────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token surface as produced by the tokenizer, e.g. "situs" or "##judi"
    pub text: String,

    /// `[start, end)` byte range in the cleaned text; `None` for special tokens
    pub offset: Option<(usize, usize)>,
}

impl Token {
    pub fn new(text: impl Into<String>, offset: Option<(usize, usize)>) -> Self {
        Self { text: text.into(), offset }
    }

    /// A special or padding token that must be ignored by decoding
    pub fn special(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }

    /// True when this piece continues the previous word rather than starting a new one
    pub fn is_continuation(&self) -> bool {
        self.text.starts_with(CONTINUATION_PREFIX)
    }
}

/// A token together with the raw label id the model assigned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledToken {
    pub token:    Token,
    pub label_id: u32,
}

impl LabeledToken {
    pub fn new(token: Token, label_id: u32) -> Self {
        Self { token, label_id }
    }
}

// ─── Entity ───────────────────────────────────────────────────────────────────
/// A decoded keyword span. `text` is always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,

    #[serde(rename = "type")]
    pub entity_type: EntityType,
}

impl Entity {
    pub fn new(text: impl Into<String>, entity_type: EntityType) -> Self {
        Self { text: text.into(), entity_type }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_scheme_is_closed() {
        assert_eq!(BioLabel::try_from(0).unwrap(), BioLabel::Outside);
        assert_eq!(BioLabel::try_from(2).unwrap(), BioLabel::Inside(EntityType::Site));
        assert_eq!(BioLabel::try_from(3).unwrap(), BioLabel::Begin(EntityType::General));
        assert!(matches!(
            BioLabel::try_from(5),
            Err(PipelineError::UnknownLabelId(5))
        ));
    }

    #[test]
    fn test_continuation_marker() {
        assert!(Token::new("##judi", Some((5, 9))).is_continuation());
        assert!(!Token::new("situs", Some((0, 5))).is_continuation());
        assert!(!Token::special("[CLS]").is_continuation());
    }

    #[test]
    fn test_entity_serialises_type_name() {
        let json = serde_json::to_value(Entity::new("judi bola", EntityType::General)).unwrap();
        assert_eq!(json["text"], "judi bola");
        assert_eq!(json["type"], "GENERAL");
    }
}
