// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits describing comments,
// datasets, token labels, entities and keyword records.
//
// Rules for this layer:
//   - NO burn or tokenizers types allowed here
//   - NO file I/O
//   - Only plain value types, the error taxonomy and the
//     collaborator traits that the ML layer implements
//
// Everything in here is created and owned inside a single
// pipeline run; nothing is shared across runs.

// Comment / Chunk / Dataset and the spam label
pub mod comment;

// Tokens, BIO labels and extracted entities
pub mod entity;

// Ranked keyword output record
pub mod keyword;

// Typed failures the pipeline can surface
pub mod error;

// Collaborator abstractions (classifier, labeler, normalizer, source)
pub mod traits;
