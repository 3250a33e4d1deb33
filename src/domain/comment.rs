// ============================================================
// Layer 3 — Comment, Chunk and Dataset
// ============================================================
// The dataset file groups comments into numbered chunks:
//
//   {
//     "total_comments": 3,
//     "total_chunks":   1,
//     "chunks": [ { "chunk_id": 1, "comments": [ { "text": "...", ... } ] } ]
//   }
//
// Comments may carry any number of extra fields (author, timestamp,
// video id...). They are opaque to us and are written back exactly
// as they came in, plus the `label` we assign.
//
// The two totals are never trusted from input. A Dataset can only
// be built from its chunk list, which recomputes them.

use serde::{de::Error as _, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::domain::error::PipelineError;

// ─── SpamLabel ────────────────────────────────────────────────────────────────
/// Output class of the sequence classifier.
/// Serialised as the bare integer (0 / 1) for downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum SpamLabel {
    NonSpam = 0,
    Spam    = 1,
}

impl SpamLabel {
    /// Human readable name used by the single-text prediction
    pub fn name(self) -> &'static str {
        match self {
            SpamLabel::NonSpam => "Non-Judol",
            SpamLabel::Spam    => "Judol",
        }
    }
}

impl TryFrom<i64> for SpamLabel {
    type Error = PipelineError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(SpamLabel::NonSpam),
            1 => Ok(SpamLabel::Spam),
            other => Err(PipelineError::UnknownClassId(other)),
        }
    }
}

impl From<SpamLabel> for i64 {
    fn from(label: SpamLabel) -> Self {
        label as i64
    }
}

// ─── Comment ──────────────────────────────────────────────────────────────────
const TEXT_KEY:  &str = "text";
const LABEL_KEY: &str = "label";

/// One comment. Serialised as the input object with its fields in
/// input order; `text` and `label` are written from the typed fields.
/// A `label` the input already carried keeps its position and is
/// overwritten once the comment is classified. A comment without
/// one gets `label` appended last.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// Raw comment text, exactly as it appeared in the input file
    pub text: String,

    /// Absent until the comment has been classified
    pub label: Option<SpamLabel>,

    /// The input object as read, in input order
    pub fields: Map<String, Value>,
}

impl Comment {
    /// A bare comment with no other fields; real comments come from the dataset file
    #[cfg(test)]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text:   text.into(),
            label:  None,
            fields: Map::new(),
        }
    }

    /// Consume the comment and return it with its classification attached.
    /// The pipeline calls this exactly once per comment.
    pub fn with_label(mut self, label: SpamLabel) -> Self {
        self.label = Some(label);
        self
    }
}

impl Serialize for Comment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.fields {
            match key.as_str() {
                TEXT_KEY => map.serialize_entry(TEXT_KEY, &self.text)?,
                LABEL_KEY => match self.label {
                    Some(label) => map.serialize_entry(LABEL_KEY, &label)?,
                    None        => map.serialize_entry(LABEL_KEY, value)?,
                },
                _ => map.serialize_entry(key, value)?,
            }
        }
        if !self.fields.contains_key(TEXT_KEY) {
            map.serialize_entry(TEXT_KEY, &self.text)?;
        }
        if let (Some(label), false) = (self.label, self.fields.contains_key(LABEL_KEY)) {
            map.serialize_entry(LABEL_KEY, &label)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Comment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let text = match fields.get(TEXT_KEY) {
            Some(Value::String(text)) => text.clone(),
            Some(_) => return Err(D::Error::custom("comment field `text` must be a string")),
            None    => return Err(D::Error::missing_field(TEXT_KEY)),
        };
        // Whatever label the input carried is not trusted.
        Ok(Self { text, label: None, fields })
    }
}

// ─── Chunk ────────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: u64,
    pub comments: Vec<Comment>,
}

impl Chunk {
    pub fn new(chunk_id: u64, comments: Vec<Comment>) -> Self {
        Self { chunk_id, comments }
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

// ─── Dataset ──────────────────────────────────────────────────────────────────
/// On-disk shape used only while deserialising. Any totals present
/// in the file are ignored and recomputed by `Dataset::from_chunks`.
#[derive(Deserialize)]
struct DatasetFile {
    chunks: Vec<Chunk>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DatasetFile")]
pub struct Dataset {
    total_comments: usize,
    total_chunks:   usize,
    chunks:         Vec<Chunk>,
}

impl From<DatasetFile> for Dataset {
    fn from(file: DatasetFile) -> Self {
        Dataset::from_chunks(file.chunks)
    }
}

impl Dataset {
    /// Build a dataset, deriving both totals from the chunks themselves
    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        let total_comments = chunks.iter().map(|c| c.comments.len()).sum();
        Self {
            total_comments,
            total_chunks: chunks.len(),
            chunks,
        }
    }

    pub fn total_comments(&self) -> usize {
        self.total_comments
    }

    pub fn total_chunks(&self) -> usize {
        self.total_chunks
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_are_recomputed_from_input() {
        // The file lies about its totals; they must be ignored
        let json = r#"{
            "total_comments": 99,
            "total_chunks": 7,
            "chunks": [
                { "chunk_id": 4, "comments": [ { "text": "a" }, { "text": "b" } ] },
                { "chunk_id": 9, "comments": [] }
            ]
        }"#;
        let ds: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(ds.total_comments(), 2);
        assert_eq!(ds.total_chunks(), 2);
        assert_eq!(ds.chunks()[0].chunk_id, 4);
    }

    fn keys(value: &Value) -> Vec<&str> {
        value.as_object().unwrap().keys().map(String::as_str).collect()
    }

    #[test]
    fn test_fields_keep_input_order_and_label_is_appended() {
        let json = r#"{"id":"c1","author":"x","text":"halo","likes":3,"video":{"id":"v1"}}"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.text, "halo");
        assert!(comment.label.is_none());

        let out = serde_json::to_value(comment.with_label(SpamLabel::Spam)).unwrap();
        assert_eq!(out["label"], 1);
        assert_eq!(out["text"], "halo");
        assert_eq!(out["likes"], 3);
        assert_eq!(out["video"]["id"], "v1");
        assert_eq!(keys(&out), ["id", "author", "text", "likes", "video", "label"]);
    }

    #[test]
    fn test_existing_label_is_overwritten_in_place() {
        let json = r#"{"text":"a","label":"unknown","id":7}"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert!(comment.label.is_none());

        // Unclassified, the input value passes through untouched
        let raw = serde_json::to_value(&comment).unwrap();
        assert_eq!(raw["label"], "unknown");

        let out = serde_json::to_value(comment.with_label(SpamLabel::NonSpam)).unwrap();
        assert_eq!(out["label"], 0);
        assert_eq!(keys(&out), ["text", "label", "id"]);
    }

    #[test]
    fn test_built_comment_serialises_text_then_label() {
        let out = serde_json::to_value(Comment::new("x").with_label(SpamLabel::Spam)).unwrap();
        assert_eq!(keys(&out), ["text", "label"]);
    }

    #[test]
    fn test_non_string_text_is_rejected() {
        assert!(serde_json::from_str::<Comment>(r#"{"text": 5}"#).is_err());
    }

    #[test]
    fn test_missing_text_is_rejected() {
        let json = r#"{ "chunks": [ { "chunk_id": 1, "comments": [ { "author": "x" } ] } ] }"#;
        assert!(serde_json::from_str::<Dataset>(json).is_err());
    }

    #[test]
    fn test_missing_chunks_is_rejected() {
        assert!(serde_json::from_str::<Dataset>(r#"{ "total_chunks": 0 }"#).is_err());
    }

    #[test]
    fn test_spam_label_conversion() {
        assert_eq!(SpamLabel::try_from(0).unwrap(), SpamLabel::NonSpam);
        assert_eq!(SpamLabel::try_from(1).unwrap(), SpamLabel::Spam);
        assert!(matches!(
            SpamLabel::try_from(2),
            Err(PipelineError::UnknownClassId(2))
        ));
    }

    #[test]
    fn test_dataset_serialises_totals_first() {
        let ds  = Dataset::from_chunks(vec![Chunk::new(3, vec![Comment::new("x")])]);
        let out = serde_json::to_value(&ds).unwrap();
        assert_eq!(out["total_comments"], 1);
        assert_eq!(out["total_chunks"], 1);
        assert_eq!(out["chunks"][0]["chunk_id"], 3);
        // An unclassified comment carries no label field at all
        assert!(out["chunks"][0]["comments"][0].get("label").is_none());
    }
}
