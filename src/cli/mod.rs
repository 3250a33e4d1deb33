// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, hands off to Layer 2 and prints the result as JSON.
//
//   predict-file — dataset file → spam / non-spam / keyword files
//   keywords     — spam dataset file → keyword file
//   predict      — one text → spam prediction
//   extract      — one text → keyword entities

pub mod commands;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use commands::{Commands, KeywordsArgs, PredictFileArgs, TextArgs};

#[derive(Parser, Debug)]
#[command(
    name = "spam-keywords",
    version,
    about = "Classify comments as spam / non-spam and mine ranked keywords from the spam."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case. Routing only, no computing.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::PredictFile(args) => run_predict_file(args),
            Commands::Keywords(args)    => run_keywords(args),
            Commands::Predict(args)     => run_predict(args),
            Commands::Extract(args)     => run_extract(args),
        }
    }
}

fn run_predict_file(args: PredictFileArgs) -> Result<()> {
    use crate::application::process_file_use_case::ProcessFileUseCase;

    tracing::info!("Processing dataset: {}", args.input.display());

    let input    = args.input.clone();
    let use_case = ProcessFileUseCase::new(args.into());
    let report   = use_case.execute(&input)?;

    print_json(&report)
}

fn run_keywords(args: KeywordsArgs) -> Result<()> {
    use crate::application::keywords_use_case::KeywordsUseCase;

    let use_case = KeywordsUseCase::new(args.models.into(), args.storage_dir);
    let path     = use_case.execute(&args.input)?;

    print_json(&serde_json::json!({ "keyword_result": path }))
}

fn run_predict(args: TextArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let use_case   = PredictUseCase::new(&args.models.into())?;
    let prediction = use_case.predict(&args.text)?;

    print_json(&prediction)
}

fn run_extract(args: TextArgs) -> Result<()> {
    use crate::application::predict_use_case::ExtractUseCase;

    let use_case   = ExtractUseCase::from_models(&args.models.into())?;
    let extraction = use_case.extract(&args.text)?;

    print_json(&extraction)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
