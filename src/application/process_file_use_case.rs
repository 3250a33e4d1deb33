// ============================================================
// Layer 2 — Process File Use Case
// ============================================================
// Runs a whole dataset file through the pipeline:
//
//   1. load the dataset JSON
//   2. partition it into spam / non-spam datasets
//   3. mine ranked keywords from the spam side
//   4. write three write-once artifacts
//   5. append a summary row
//
// Steps 2–3 live in `run_pipeline`, which only talks to the
// collaborator traits and can therefore be exercised with fakes.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::application::config::PipelineConfig;
use crate::data::{
    aggregator::KeywordAggregator,
    batch_classifier::BatchClassifier,
    extractor::EntityExtractor,
    loader::JsonDatasetLoader,
    partitioner::{ChunkLayout, ChunkPartitioner},
    preprocessor::CommentNormalizer,
};
use crate::domain::comment::Dataset;
use crate::domain::keyword::KeywordRecord;
use crate::domain::traits::{DatasetSource, SequenceClassifier, TextNormalizer, TokenLabeler};
use crate::infra::{
    metrics::{RunSummary, SummaryLogger},
    storage::{ArtifactKind, ArtifactStore},
};
use crate::ml::{classifier::SpamClassifier, tagger::KeywordTagger};

/// Everything one pipeline run produces, before anything is written
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub spam:     Dataset,
    pub non_spam: Dataset,
    pub keywords: Vec<KeywordRecord>,
}

impl PipelineOutput {
    pub fn summary(&self, run_id: impl Into<String>) -> RunSummary {
        RunSummary {
            run_id:            run_id.into(),
            total_comments:    self.spam.total_comments() + self.non_spam.total_comments(),
            spam_comments:     self.spam.total_comments(),
            non_spam_comments: self.non_spam.total_comments(),
            spam_chunks:       self.spam.total_chunks(),
            non_spam_chunks:   self.non_spam.total_chunks(),
            keywords:          self.keywords.len(),
        }
    }
}

/// Paths of the written artifacts plus the run's counts
#[derive(Debug, Clone, Serialize)]
pub struct ProcessFileReport {
    pub judol_result:     PathBuf,
    pub non_judol_result: PathBuf,
    pub keyword_result:   PathBuf,
    pub summary_csv:      PathBuf,
    pub summary:          RunSummary,
}

/// Partition `dataset` and rank the keywords of its spam side
pub fn run_pipeline<C, L, N>(
    dataset:    Dataset,
    classifier: &C,
    labeler:    &L,
    normalizer: &N,
    batch_size: usize,
    layout:     ChunkLayout,
) -> Result<PipelineOutput>
where
    C: SequenceClassifier,
    L: TokenLabeler,
    N: TextNormalizer,
{
    let batch   = BatchClassifier::new(classifier, batch_size);
    let outcome = ChunkPartitioner::new(layout).partition(dataset, &batch, normalizer)?;

    let aggregator = KeywordAggregator::new(EntityExtractor::new(labeler, normalizer));
    let keywords   = aggregator.aggregate(&outcome.spam)?;

    Ok(PipelineOutput {
        spam:     outcome.spam,
        non_spam: outcome.non_spam,
        keywords,
    })
}

/// Write the three artifacts of `output` into `store`
pub fn write_artifacts(
    store:  &ArtifactStore,
    output: &PipelineOutput,
    run_id: &str,
) -> Result<ProcessFileReport> {
    let judol_result     = store.write(ArtifactKind::Spam, &output.spam)?;
    let non_judol_result = store.write(ArtifactKind::NonSpam, &output.non_spam)?;
    let keyword_result   = store.write(ArtifactKind::Keywords, &output.keywords)?;

    let summary = output.summary(run_id);
    let logger = SummaryLogger::new(store.root())?;
    logger.log(&summary)?;

    tracing::info!("spam result:     {}", judol_result.display());
    tracing::info!("non-spam result: {}", non_judol_result.display());
    tracing::info!("keyword result:  {}", keyword_result.display());

    Ok(ProcessFileReport {
        judol_result,
        non_judol_result,
        keyword_result,
        summary_csv: logger.csv_path().to_path_buf(),
        summary,
    })
}

pub struct ProcessFileUseCase {
    config: PipelineConfig,
}

impl ProcessFileUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, input: &Path) -> Result<ProcessFileReport> {
        let cfg = &self.config;

        // ── Step 1: Load the dataset ──────────────────────────────────────────
        let dataset = JsonDatasetLoader::new(input).load()?;

        // ── Step 2: Load both models ──────────────────────────────────────────
        let classifier = SpamClassifier::from_dir(&cfg.models.classifier_dir, cfg.models.max_length)?;
        let tagger     = KeywordTagger::from_dir(&cfg.models.ner_dir, cfg.models.max_length)?;

        // ── Step 3: Partition + keywords ──────────────────────────────────────
        let output = run_pipeline(
            dataset,
            &classifier,
            &tagger,
            &CommentNormalizer::new(),
            cfg.batch_size,
            cfg.layout,
        )?;

        // ── Step 4: Persist ───────────────────────────────────────────────────
        let store  = ArtifactStore::open(&cfg.storage_dir)?;
        let run_id = Uuid::new_v4().simple().to_string();
        write_artifacts(&store, &output, &run_id)
    }
}
