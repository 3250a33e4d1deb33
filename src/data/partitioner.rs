// ============================================================
// Layer 4 — Chunk Partitioner
// ============================================================
// Replays a chunked comment dataset through the classifier and
// splits it into a spam dataset and a non-spam dataset.
//
// Per input chunk (in order):
//   1. normalise every comment text (the stored text stays raw)
//   2. classify the chunk's texts in one BatchClassifier call
//   3. attach the label to each comment
//   4. split into two sub-sequences, keeping relative order
//   5. each non-empty side becomes Chunk{same chunk_id, side}
//
//   input:     chunk 1 [a b c]   chunk 2 [d]   chunk 3 [e f]
//   labels:            1 0 1             0             1 1
//   spam:      chunk 1 [a c]                  chunk 3 [e f]
//   non-spam:  chunk 1 [b]       chunk 2 [d]
//
// Gaps in the chunk ids of either side are expected. Totals of
// both outputs are derived from their final contents.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::batch_classifier::BatchClassifier;
use crate::data::chunker::Rechunker;
use crate::domain::comment::{Chunk, Comment, Dataset, SpamLabel};
use crate::domain::traits::{SequenceClassifier, TextNormalizer};

// ─── ChunkLayout ──────────────────────────────────────────────────────────────
/// How the two output datasets are chunked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkLayout {
    /// Keep the input chunk ids, drop chunks left empty on a side
    #[default]
    Preserve,

    /// Flatten each side and cut it into fresh chunks numbered from 1
    Rechunk { max_per_chunk: usize },
}

/// The two label-grouped datasets produced by one partition run
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionOutcome {
    pub spam:     Dataset,
    pub non_spam: Dataset,
}

impl PartitionOutcome {
    pub fn total_comments(&self) -> usize {
        self.spam.total_comments() + self.non_spam.total_comments()
    }
}

// ─── ChunkPartitioner ─────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkPartitioner {
    layout: ChunkLayout,
}

impl ChunkPartitioner {
    pub fn new(layout: ChunkLayout) -> Self {
        Self { layout }
    }

    pub fn partition<C, N>(
        &self,
        dataset:    Dataset,
        classifier: &BatchClassifier<'_, C>,
        normalizer: &N,
    ) -> Result<PartitionOutcome>
    where
        C: SequenceClassifier + ?Sized,
        N: TextNormalizer + ?Sized,
    {
        tracing::info!(
            "Partitioning {} comments in {} chunks",
            dataset.total_comments(),
            dataset.total_chunks()
        );

        let mut spam_chunks     = Vec::new();
        let mut non_spam_chunks = Vec::new();

        for chunk in dataset.into_chunks() {
            if chunk.is_empty() {
                continue;
            }
            tracing::debug!(
                "Classifying chunk {} ({} comments, batches of {})",
                chunk.chunk_id,
                chunk.comments.len(),
                classifier.batch_size()
            );

            let chunk_id = chunk.chunk_id;
            let texts: Vec<String> = chunk
                .comments
                .iter()
                .map(|c| normalizer.normalize(&c.text))
                .collect();

            let labels = classifier
                .classify(&texts)
                .with_context(|| format!("Failed to classify chunk {chunk_id}"))?;

            let (spam, non_spam): (Vec<Comment>, Vec<Comment>) = chunk
                .comments
                .into_iter()
                .zip(labels)
                .map(|(comment, label)| comment.with_label(label))
                .partition(|c| c.label == Some(SpamLabel::Spam));

            tracing::debug!(
                "Chunk {}: {} spam, {} non-spam",
                chunk_id,
                spam.len(),
                non_spam.len()
            );

            if !spam.is_empty() {
                spam_chunks.push(Chunk::new(chunk_id, spam));
            }
            if !non_spam.is_empty() {
                non_spam_chunks.push(Chunk::new(chunk_id, non_spam));
            }
        }

        let outcome = PartitionOutcome {
            spam:     self.assemble(spam_chunks),
            non_spam: self.assemble(non_spam_chunks),
        };

        tracing::info!(
            "Partitioned {} comments: {} spam in {} chunks, {} non-spam in {} chunks",
            outcome.total_comments(),
            outcome.spam.total_comments(),
            outcome.spam.total_chunks(),
            outcome.non_spam.total_comments(),
            outcome.non_spam.total_chunks()
        );
        Ok(outcome)
    }

    fn assemble(&self, chunks: Vec<Chunk>) -> Dataset {
        match self.layout {
            ChunkLayout::Preserve => Dataset::from_chunks(chunks),
            ChunkLayout::Rechunk { max_per_chunk } => {
                let flat = chunks.into_iter().flat_map(|c| c.comments).collect();
                Dataset::from_chunks(Rechunker::new(max_per_chunk).rechunk(flat))
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PipelineError;
    use crate::test_support::{keyword_rule, FnClassifier, IdentityNormalizer};

    fn dataset(chunks: Vec<(u64, Vec<&str>)>) -> Dataset {
        Dataset::from_chunks(
            chunks
                .into_iter()
                .map(|(id, texts)| Chunk::new(id, texts.into_iter().map(Comment::new).collect()))
                .collect(),
        )
    }

    fn comments(ds: &Dataset) -> impl Iterator<Item = &Comment> {
        ds.chunks().iter().flat_map(|c| c.comments.iter())
    }

    fn assert_totals_consistent(ds: &Dataset) {
        assert_eq!(ds.total_chunks(), ds.chunks().len());
        assert_eq!(ds.total_comments(), comments(ds).count());
    }

    #[test]
    fn test_single_chunk_split() {
        let input = dataset(vec![(7, vec!["judi online", "halo kak", "slot gacor"])]);
        let model = FnClassifier::new(keyword_rule);
        let bc    = BatchClassifier::new(&model, 16);

        let out = ChunkPartitioner::default()
            .partition(input, &bc, &IdentityNormalizer)
            .unwrap();

        assert_eq!(out.spam.total_chunks(), 1);
        assert_eq!(out.spam.total_comments(), 2);
        assert_eq!(out.spam.chunks()[0].chunk_id, 7);
        assert_eq!(out.spam.chunks()[0].comments[0].text, "judi online");
        assert_eq!(out.spam.chunks()[0].comments[1].text, "slot gacor");

        assert_eq!(out.non_spam.total_chunks(), 1);
        assert_eq!(out.non_spam.total_comments(), 1);
        assert_eq!(out.non_spam.chunks()[0].chunk_id, 7);
        assert_eq!(out.non_spam.chunks()[0].comments[0].label, Some(SpamLabel::NonSpam));

        // One classifier call for the whole chunk
        assert_eq!(model.batch_sizes(), vec![3]);
    }

    #[test]
    fn test_one_sided_chunks_are_absent_from_other_side() {
        let input = dataset(vec![
            (1, vec!["judi", "halo"]),
            (2, vec!["mantap videonya"]),
            (3, vec!["slot", "gacor"]),
        ]);
        let model = FnClassifier::new(keyword_rule);
        let bc    = BatchClassifier::new(&model, 16);

        let out = ChunkPartitioner::default()
            .partition(input, &bc, &IdentityNormalizer)
            .unwrap();

        let spam_ids: Vec<u64>     = out.spam.chunks().iter().map(|c| c.chunk_id).collect();
        let non_spam_ids: Vec<u64> = out.non_spam.chunks().iter().map(|c| c.chunk_id).collect();
        assert_eq!(spam_ids, vec![1, 3]);
        assert_eq!(non_spam_ids, vec![1, 2]);

        assert_totals_consistent(&out.spam);
        assert_totals_consistent(&out.non_spam);
        assert_eq!(out.total_comments(), 5);
    }

    #[test]
    fn test_every_comment_lands_on_exactly_one_side() {
        let input = dataset(vec![
            (1, vec!["a judi", "b", "c slot", "d"]),
            (2, vec!["e", "f gacor"]),
            (3, vec![]),
            (4, vec!["g", "h", "i judi"]),
        ]);
        let model = FnClassifier::new(keyword_rule);
        let bc    = BatchClassifier::new(&model, 2);

        let out = ChunkPartitioner::default()
            .partition(input, &bc, &IdentityNormalizer)
            .unwrap();

        let mut seen: Vec<&str> = comments(&out.spam)
            .chain(comments(&out.non_spam))
            .map(|c| c.text.as_str())
            .collect();
        seen.sort();
        assert_eq!(seen, vec!["a judi", "b", "c slot", "d", "e", "f gacor", "g", "h", "i judi"]);
        assert!(comments(&out.spam).all(|c| c.label == Some(SpamLabel::Spam)));
        assert!(comments(&out.non_spam).all(|c| c.label == Some(SpamLabel::NonSpam)));
    }

    #[test]
    fn test_empty_input_chunk_makes_no_call() {
        let input = dataset(vec![(1, vec![])]);
        let model = FnClassifier::new(keyword_rule);
        let bc    = BatchClassifier::new(&model, 16);

        let out = ChunkPartitioner::default()
            .partition(input, &bc, &IdentityNormalizer)
            .unwrap();

        assert!(model.batch_sizes().is_empty());
        assert_eq!(out.spam, Dataset::from_chunks(Vec::new()));
        assert_eq!(out.non_spam, Dataset::from_chunks(Vec::new()));
    }

    struct Upper;

    impl TextNormalizer for Upper {
        fn normalize(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    #[test]
    fn test_model_sees_normalised_text_but_output_keeps_raw() {
        let input = dataset(vec![(1, vec!["judi"])]);
        let model = FnClassifier::new(|t: &str| (t == "JUDI") as i64);
        let bc    = BatchClassifier::new(&model, 16);

        let out = ChunkPartitioner::default().partition(input, &bc, &Upper).unwrap();
        assert_eq!(model.batches.borrow()[0], vec!["JUDI".to_string()]);
        assert_eq!(out.spam.chunks()[0].comments[0].text, "judi");
    }

    #[test]
    fn test_rechunk_layout_renumbers_each_side() {
        let input = dataset(vec![
            (10, vec!["judi 1", "x"]),
            (20, vec!["judi 2", "judi 3", "y"]),
        ]);
        let model = FnClassifier::new(keyword_rule);
        let bc    = BatchClassifier::new(&model, 16);

        let out = ChunkPartitioner::new(ChunkLayout::Rechunk { max_per_chunk: 2 })
            .partition(input, &bc, &IdentityNormalizer)
            .unwrap();

        let spam_ids: Vec<u64> = out.spam.chunks().iter().map(|c| c.chunk_id).collect();
        assert_eq!(spam_ids, vec![1, 2]);
        assert_eq!(out.spam.chunks()[1].comments[0].text, "judi 3");
        assert_eq!(out.non_spam.total_chunks(), 1);
        assert_eq!(out.non_spam.chunks()[0].chunk_id, 1);
        assert_totals_consistent(&out.spam);
    }

    #[test]
    fn test_classifier_failure_aborts_run() {
        let input = dataset(vec![(1, vec!["a"]), (2, vec!["b"])]);
        let model = FnClassifier::new(|t: &str| if t == "b" { 7 } else { 0 });
        let bc    = BatchClassifier::new(&model, 16);

        let err = ChunkPartitioner::default()
            .partition(input, &bc, &IdentityNormalizer)
            .unwrap_err();
        assert!(err.to_string().contains("chunk 2"));
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::UnknownClassId(7))
        ));
    }
}
