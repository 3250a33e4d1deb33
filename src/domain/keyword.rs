// ============================================================
// Layer 3 — Keyword Record
// ============================================================
// One row of the ranked keyword file:
//
//   { "id": 1, "keyword": "judi bola", "label": 1,
//     "entity_type": "GENERAL", "frequency": 2 }
//
// `id` is the 1-based rank. `label` is always 1 because every
// keyword is mined from the spam side of the dataset.

use serde::{Deserialize, Serialize};

use crate::domain::comment::SpamLabel;
use crate::domain::entity::EntityType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub id:          usize,
    pub keyword:     String,
    pub label:       SpamLabel,
    pub entity_type: EntityType,
    pub frequency:   usize,
}

impl KeywordRecord {
    pub fn new(id: usize, keyword: impl Into<String>, entity_type: EntityType, frequency: usize) -> Self {
        Self {
            id,
            keyword: keyword.into(),
            label: SpamLabel::Spam,
            entity_type,
            frequency,
        }
    }
}
