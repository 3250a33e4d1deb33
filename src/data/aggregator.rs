// ============================================================
// Layer 4 — Keyword Aggregator
// ============================================================
// Mines every spam comment for entities and ranks the distinct
// keyword strings by how often they occur.
//
// Traversal is fixed: chunk order, then comment order, then the
// order entities come out of the decoder. That traversal defines
// "first seen", which breaks ties between equal frequencies:
//
//   seen:    "slot88" "judi bola" "slot88" "gacor" "judi bola"
//   tally:   slot88=2 (1st)  judi bola=2 (2nd)  gacor=1 (3rd)
//   ranked:  1 slot88  2 judi bola  3 gacor
//
// Keywords are matched exactly after trimming (case-sensitive).
// One-character keywords carry no signal and are dropped.

use anyhow::{Context, Result};
use std::collections::HashMap;

use crate::data::extractor::EntityExtractor;
use crate::domain::comment::Dataset;
use crate::domain::entity::{Entity, EntityType};
use crate::domain::keyword::KeywordRecord;
use crate::domain::traits::{TextNormalizer, TokenLabeler};

// ─── KeywordTally ─────────────────────────────────────────────────────────────
/// Frequency map that remembers first-seen order.
/// `index` points into `slots`, which only ever grows at the end.
#[derive(Debug, Default)]
pub struct KeywordTally {
    index: HashMap<String, usize>,
    slots: Vec<(String, EntityType, usize)>,
}

impl KeywordTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one entity occurrence. Returns false when it was discarded.
    pub fn record(&mut self, entity: &Entity) -> bool {
        let keyword = entity.text.trim();
        if keyword.chars().count() <= 1 {
            return false;
        }

        match self.index.get(keyword) {
            Some(&slot) => self.slots[slot].2 += 1,
            None => {
                self.index.insert(keyword.to_string(), self.slots.len());
                self.slots.push((keyword.to_string(), entity.entity_type, 1));
            }
        }
        true
    }

    pub fn distinct(&self) -> usize {
        self.slots.len()
    }

    /// Rank by frequency, descending. `sort_by` is stable, so equal
    /// counts keep first-seen order.
    pub fn into_ranked(self) -> Vec<KeywordRecord> {
        let mut slots = self.slots;
        slots.sort_by(|a, b| b.2.cmp(&a.2));

        slots
            .into_iter()
            .enumerate()
            .map(|(i, (keyword, entity_type, count))| {
                KeywordRecord::new(i + 1, keyword, entity_type, count)
            })
            .collect()
    }
}

// ─── KeywordAggregator ────────────────────────────────────────────────────────
pub struct KeywordAggregator<L, N> {
    extractor: EntityExtractor<L, N>,
}

impl<L: TokenLabeler, N: TextNormalizer> KeywordAggregator<L, N> {
    pub fn new(extractor: EntityExtractor<L, N>) -> Self {
        Self { extractor }
    }

    pub fn aggregate(&self, spam: &Dataset) -> Result<Vec<KeywordRecord>> {
        tracing::info!(
            "Extracting keywords from {} spam comments",
            spam.total_comments()
        );

        let mut tally     = KeywordTally::new();
        let mut counted   = 0usize;
        let mut discarded = 0usize;

        for chunk in spam.chunks() {
            for (pos, comment) in chunk.comments.iter().enumerate() {
                let entities = self.extractor.extract(&comment.text).with_context(|| {
                    format!("Keyword extraction failed for comment {} of chunk {}", pos, chunk.chunk_id)
                })?;

                for entity in &entities {
                    if tally.record(entity) {
                        counted += 1;
                    } else {
                        discarded += 1;
                    }
                }
            }
        }

        tracing::info!(
            "Found {} distinct keywords ({} occurrences, {} discarded)",
            tally.distinct(),
            counted,
            discarded
        );
        Ok(tally.into_ranked())
    }
}
