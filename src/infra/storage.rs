// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Writes the pipeline outputs as write-once JSON files:
//
//   storage/
//     judol/judol_<uuid>.json           ← spam dataset
//     non_judol/non_judol_<uuid>.json   ← non-spam dataset
//     keywords/keywords_<uuid>.json     ← ranked keyword list
//     summary.csv                       ← see metrics.rs
//
// Files are created with create-new semantics: an existing file
// is never overwritten or appended to.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs::{self, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use uuid::Uuid;

use crate::domain::error::PipelineError;

/// The three kinds of artifacts a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Spam,
    NonSpam,
    Keywords,
}

impl ArtifactKind {
    /// Sub-directory and file prefix for this kind
    pub fn prefix(self) -> &'static str {
        match self {
            ArtifactKind::Spam     => "judol",
            ArtifactKind::NonSpam  => "non_judol",
            ArtifactKind::Keywords => "keywords",
        }
    }
}

pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Create the store, making sure every artifact directory exists
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for kind in [ArtifactKind::Spam, ArtifactKind::NonSpam, ArtifactKind::Keywords] {
            let dir = root.join(kind.prefix());
            fs::create_dir_all(&dir)
                .with_context(|| format!("Cannot create directory '{}'", dir.display()))?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A fresh, unique path for an artifact of `kind`
    pub fn new_path(&self, kind: ArtifactKind) -> PathBuf {
        self.root
            .join(kind.prefix())
            .join(format!("{}_{}.json", kind.prefix(), Uuid::new_v4().simple()))
    }

    /// Serialise `value` as pretty JSON into a new artifact and return its path
    pub fn write<T: Serialize + ?Sized>(&self, kind: ArtifactKind, value: &T) -> Result<PathBuf> {
        let path = self.new_path(kind);
        write_json_once(&path, value)?;
        Ok(path)
    }
}

/// Write pretty JSON (UTF-8, non-ASCII kept as is) to a file that must not exist yet
pub fn write_json_once<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(PipelineError::ArtifactExists(path.display().to_string()).into());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Cannot create '{}'", path.display()));
        }
    };

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Cannot serialise '{}'", path.display()))?;
    writer.flush()?;

    tracing::debug!("Wrote artifact '{}'", path.display());
    Ok(())
}
