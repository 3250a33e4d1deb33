// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting file handling that doesn't belong to any one
// business layer:
//
//   checkpoint.rs      — model config + burn CompactRecorder weights
//   tokenizer_store.rs — HuggingFace tokenizer.json loading
//   storage.rs         — write-once JSON artifacts with unique names
//   metrics.rs         — per-run summary CSV

/// Model checkpoint loading
pub mod checkpoint;

/// Tokenizer loading
pub mod tokenizer_store;

/// Write-once output artifacts
pub mod storage;

/// Run summary CSV logger
pub mod metrics;
