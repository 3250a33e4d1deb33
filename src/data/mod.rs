// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a raw dataset file and the ranked keyword
// list, with the models reached only through domain traits.
//
//   dataset.json
//       │
//       ▼
//   JsonDatasetLoader   → Dataset (totals recomputed)
//       │
//       ▼
//   ChunkPartitioner    → normalise + BatchClassifier per chunk
//       │
//       ├──────────────▶ non-spam Dataset
//       ▼
//   spam Dataset
//       │
//       ▼
//   KeywordAggregator   → EntityExtractor → SpanDecoder per comment
//       │
//       ▼
//   ranked KeywordRecords
//
// The EncodingBatcher is the one piece used by the ML layer: it
// pads tokenised texts into burn tensors.

/// Reads dataset JSON files
pub mod loader;

/// Cleans comment text before it reaches a model
pub mod preprocessor;

/// BIO label stream → entity spans
pub mod span_decoder;

/// Normalise + label + decode for one text
pub mod extractor;

/// Fixed-size windowed classification
pub mod batch_classifier;

/// Splits a dataset into spam / non-spam datasets
pub mod partitioner;

/// Re-splits a flat comment list into numbered chunks
pub mod chunker;

/// Frequency ranking of extracted keywords
pub mod aggregator;

/// Pads encodings into [batch, seq] tensors
pub mod batcher;
