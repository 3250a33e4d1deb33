// ============================================================
// Layer 4 — Comment Re-chunker
// ============================================================
// Re-splits a flat, ordered list of comments into consecutive
// chunks of at most `max_per_chunk` comments, numbered from 1.
//
// Example with max_per_chunk = 2:
//   comments: c1 c2 c3 c4 c5
//   chunk 1:  c1 c2
//   chunk 2:  c3 c4
//   chunk 3:  c5
//
// Only used by the opt-in re-chunk layout of the partitioner.
// The default layout keeps the input chunk ids instead.

use crate::domain::comment::{Chunk, Comment};

/// Chunk size used by the original batch tool
pub const DEFAULT_MAX_PER_CHUNK: usize = 100;

#[derive(Debug, Clone, Copy)]
pub struct Rechunker {
    max_per_chunk: usize,
}

impl Rechunker {
    /// # Panics
    /// Panics if `max_per_chunk` is zero
    pub fn new(max_per_chunk: usize) -> Self {
        assert!(
            max_per_chunk > 0,
            "max_per_chunk ({}) must be at least 1",
            max_per_chunk
        );
        Self { max_per_chunk }
    }

    /// Split `comments` into numbered chunks, preserving order.
    /// No comments → no chunks.
    pub fn rechunk(&self, comments: Vec<Comment>) -> Vec<Chunk> {
        let mut chunks = Vec::with_capacity(self.num_chunks(comments.len()));
        let mut iter   = comments.into_iter().peekable();
        let mut next_id = 1u64;

        while iter.peek().is_some() {
            let window: Vec<Comment> = iter.by_ref().take(self.max_per_chunk).collect();
            chunks.push(Chunk::new(next_id, window));
            next_id += 1;
        }

        chunks
    }

    /// How many chunks `count` comments produce
    pub fn num_chunks(&self, count: usize) -> usize {
        count.div_ceil(self.max_per_chunk)
    }
}

impl Default for Rechunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PER_CHUNK)
    }
}
