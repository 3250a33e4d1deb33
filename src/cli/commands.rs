// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the four subcommands and all their configurable flags.
//
// clap's derive macros generate help text, error messages for
// missing args and type conversion (string → usize, PathBuf).

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::config::{ModelConfig, PipelineConfig};
use crate::data::partitioner::ChunkLayout;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a comment dataset into spam / non-spam files and mine keywords
    PredictFile(PredictFileArgs),

    /// Mine ranked keywords from an existing spam dataset file
    Keywords(KeywordsArgs),

    /// Classify a single text
    Predict(TextArgs),

    /// Extract keyword entities from a single text
    Extract(TextArgs),
}

/// Model locations shared by every command
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Sequence classifier directory (tokenizer.json, model_config.json, model.mpk)
    #[arg(long, default_value = "app/model/classifier")]
    pub classifier_dir: PathBuf,

    /// Token classifier (NER) directory, same layout
    #[arg(long, default_value = "app/model/ner")]
    pub ner_dir: PathBuf,

    /// Maximum number of tokens per encoded text
    #[arg(long, default_value_t = 128, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_length: u16,
}

impl From<ModelArgs> for ModelConfig {
    fn from(a: ModelArgs) -> Self {
        ModelConfig {
            classifier_dir: a.classifier_dir,
            ner_dir:        a.ner_dir,
            max_length:     a.max_length as usize,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictFileArgs {
    /// Dataset JSON: { "chunks": [ { "chunk_id", "comments": [ { "text", ... } ] } ] }
    #[arg(long)]
    pub input: PathBuf,

    /// Root directory for judol/, non_judol/, keywords/ and summary.csv
    #[arg(long, default_value = "storage")]
    pub storage_dir: PathBuf,

    /// Texts per classifier call
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(1..))]
    pub batch_size: u32,

    /// Re-split each output into chunks of at most N comments numbered from 1,
    /// instead of keeping the input chunk ids
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub rechunk: Option<u32>,

    #[command(flatten)]
    pub models: ModelArgs,
}

impl From<PredictFileArgs> for PipelineConfig {
    fn from(a: PredictFileArgs) -> Self {
        let layout = match a.rechunk {
            Some(n) => ChunkLayout::Rechunk { max_per_chunk: n as usize },
            None    => ChunkLayout::Preserve,
        };
        PipelineConfig {
            models:      a.models.into(),
            storage_dir: a.storage_dir,
            batch_size:  a.batch_size as usize,
            layout,
        }
    }
}

#[derive(Args, Debug)]
pub struct KeywordsArgs {
    /// Spam dataset JSON written by `predict-file`
    #[arg(long)]
    pub input: PathBuf,

    /// Root directory for the keywords/ artifact
    #[arg(long, default_value = "storage")]
    pub storage_dir: PathBuf,

    #[command(flatten)]
    pub models: ModelArgs,
}

#[derive(Args, Debug)]
pub struct TextArgs {
    /// The comment text
    #[arg(long)]
    pub text: String,

    #[command(flatten)]
    pub models: ModelArgs,
}
