// ============================================================
// Layer 6 — Run Summary Logger
// ============================================================
// Appends one CSV row per processed file so that runs can be
// compared over time.
//
// Output file: storage/summary.csv
//
//   run_id,total_comments,spam_comments,non_spam_comments,spam_chunks,non_spam_chunks,keywords
//   3f2a…,1200,310,890,4,12,57

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

const HEADER: &str =
    "run_id,total_comments,spam_comments,non_spam_comments,spam_chunks,non_spam_chunks,keywords";

/// Counts describing one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id:            String,
    pub total_comments:    usize,
    pub spam_comments:     usize,
    pub non_spam_comments: usize,
    pub spam_chunks:       usize,
    pub non_spam_chunks:   usize,
    pub keywords:          usize,
}

impl RunSummary {
    /// Share of comments classified as spam, 0.0 for an empty run
    pub fn spam_ratio(&self) -> f64 {
        if self.total_comments == 0 {
            return 0.0;
        }
        self.spam_comments as f64 / self.total_comments as f64
    }

    fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.run_id,
            self.total_comments,
            self.spam_comments,
            self.non_spam_comments,
            self.spam_chunks,
            self.non_spam_chunks,
            self.keywords,
        )
    }
}

pub struct SummaryLogger {
    csv_path: PathBuf,
}

impl SummaryLogger {
    /// Writes the CSV header if the file doesn't exist yet
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("summary.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created summary CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, summary: &RunSummary) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(f, "{}", summary.csv_row())?;

        tracing::debug!(
            "Logged run {}: {} of {} comments are spam ({:.1}%)",
            summary.run_id,
            summary.spam_comments,
            summary.total_comments,
            summary.spam_ratio() * 100.0
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
