// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers for one user-facing goal each.
//
// Rules for this layer:
//   - No model math here (Layer 5)
//   - No printing here (Layer 1)
//   - Only workflow coordination

// Config structs built from CLI arguments
pub mod config;

// Whole dataset file: partition + keywords + artifacts
pub mod process_file_use_case;

// Keywords from an existing spam dataset
pub mod keywords_use_case;

// Single-text classification and extraction
pub mod predict_use_case;
