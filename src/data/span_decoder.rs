// ============================================================
// Layer 4 — BIO Span Decoder
// ============================================================
// Turns a stream of labelled sub-word tokens back into clean
// keyword spans of the cleaned text.
//
// The decoder is a two-state machine:
//
//   Idle ──B-x / I-x──▶ Open{x, start, end}
//   Open ──B-y────────▶ close, Open{y}
//   Open ──I-x or ##──▶ Open (end extended)
//   Open ──I-y────────▶ close, Open{y}
//   Open ──O + ##─────▶ Open (end extended)
//   Open ──O──────────▶ close, Idle
//
// "##" means the token is a WordPiece continuation. Extending on
// an O-tagged continuation recovers the tail of a word the model
// failed to tag; it is kept exactly as is and not generalised.
//
// A closed span is materialised by slicing the cleaned text with
// its byte range, never by gluing token pieces together, so
// sub-word splits reconstruct the original spelling.
//
// Special tokens have no offset and are skipped before their
// label is even looked at.

use crate::domain::entity::{BioLabel, Entity, EntityType, LabeledToken};
use crate::domain::error::PipelineError;

// ─── State ────────────────────────────────────────────────────────────────────
/// An entity that has been opened and may still grow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSpan {
    pub entity_type: EntityType,
    pub start:       usize,
    pub end:         usize,
}

impl OpenSpan {
    fn extended_to(self, end: usize) -> Self {
        Self { end, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    #[default]
    Idle,
    Open(OpenSpan),
}

/// One non-special token as seen by the transition function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedPiece {
    pub label:        BioLabel,
    pub start:        usize,
    pub end:          usize,
    pub continuation: bool,
}

// ─── Transition ───────────────────────────────────────────────────────────────
/// Pure transition: returns the next state and the span closed by
/// this token, if any.
pub fn step(state: DecoderState, piece: TaggedPiece) -> (DecoderState, Option<OpenSpan>) {
    let open = |entity_type| {
        DecoderState::Open(OpenSpan { entity_type, start: piece.start, end: piece.end })
    };

    match (state, piece.label) {
        // B- always starts fresh, even right after a B- of the same type
        (DecoderState::Idle, BioLabel::Begin(t)) => (open(t), None),
        (DecoderState::Open(cur), BioLabel::Begin(t)) => (open(t), Some(cur)),

        // A dangling I- is treated as a B-
        (DecoderState::Idle, BioLabel::Inside(t)) => (open(t), None),
        (DecoderState::Open(cur), BioLabel::Inside(t)) => {
            if t == cur.entity_type || piece.continuation {
                (DecoderState::Open(cur.extended_to(piece.end)), None)
            } else {
                (open(t), Some(cur))
            }
        }

        (DecoderState::Idle, BioLabel::Outside) => (DecoderState::Idle, None),
        (DecoderState::Open(cur), BioLabel::Outside) => {
            if piece.continuation {
                (DecoderState::Open(cur.extended_to(piece.end)), None)
            } else {
                (DecoderState::Idle, Some(cur))
            }
        }
    }
}

// ─── Finalisation ─────────────────────────────────────────────────────────────
/// Slice the span out of the cleaned text. Ranges that fall outside
/// the text, split a UTF-8 character or trim to nothing are dropped.
pub fn finalize(text: &str, span: OpenSpan) -> Option<Entity> {
    let Some(slice) = text.get(span.start..span.end) else {
        tracing::warn!(
            "Dropping span [{}, {}) outside of a {}-byte text",
            span.start,
            span.end,
            text.len()
        );
        return None;
    };

    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(Entity::new(trimmed, span.entity_type))
}

// ─── Driver ───────────────────────────────────────────────────────────────────
/// Decode a labelled token sequence over `text` into entities, in order.
///
/// Fails only on a label id outside the five-class scheme.
pub fn decode(text: &str, tokens: &[LabeledToken]) -> Result<Vec<Entity>, PipelineError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut entities = Vec::new();
    let mut state    = DecoderState::Idle;

    for labeled in tokens {
        let Some((start, end)) = labeled.token.offset else {
            continue;
        };

        let piece = TaggedPiece {
            label:        BioLabel::try_from(labeled.label_id)?,
            start,
            end,
            continuation: labeled.token.is_continuation(),
        };

        let (next, closed) = step(state, piece);
        if let Some(span) = closed {
            entities.extend(finalize(text, span));
        }
        state = next;
    }

    if let DecoderState::Open(span) = state {
        entities.extend(finalize(text, span));
    }

    Ok(entities)
}
