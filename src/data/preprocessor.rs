// ============================================================
// Layer 4 — Comment Normaliser
// ============================================================
// Cleans raw comment text before it reaches either model.
//
// Comments scraped from social platforms often contain:
//   - HTML markup (<br>, <a href=...>, <b>)
//   - "@@handle" mention artefacts
//   - emoji, punctuation runs, decorative symbols
//   - "fancy" Unicode letters (ｓｌｏｔ, 𝓼𝓵𝓸𝓽) and accents
//   - irregular whitespace
//
// Cleaning steps (applied in order):
//   1. Replace HTML tags with a space
//   2. Remove "@@handle" mentions that are not glued to a word
//   3. Transliterate everything to ASCII
//   4. Keep "#hashtags" verbatim as standalone words
//   5. Replace anything that is not a word character,
//      whitespace or '%' with a space
//   6. Collapse whitespace runs and trim
//
// The result is stable under re-application, so the same
// cleaner can run in front of both the classifier and the
// token labeler.

use deunicode::deunicode;
use regex::Regex;
use std::sync::LazyLock;

use crate::domain::traits::TextNormalizer;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid HTML tag pattern"));

static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B@@\w+").expect("valid mention pattern"));

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("valid hashtag pattern"));

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s%]").expect("valid symbol pattern"));

pub struct CommentNormalizer;

impl CommentNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw comment. Takes a &str and returns an owned String.
    pub fn clean(&self, text: &str) -> String {
        // ── Steps 1 & 2: markup and mentions ──────────────────────────────────
        let text = HTML_TAG.replace_all(text, " ");
        let text = MENTION.replace_all(&text, "");

        // ── Step 3: fold to ASCII, as the models were trained on ─────────────
        let text = deunicode(&text);

        // ── Steps 4 & 5: strip symbols everywhere except inside hashtags ──────
        // Each hashtag is padded with spaces so it stays a word of its own.
        let mut out  = String::with_capacity(text.len());
        let mut last = 0;
        for tag in HASHTAG.find_iter(&text) {
            out.push_str(&NON_WORD.replace_all(&text[last..tag.start()], " "));
            out.push(' ');
            out.push_str(tag.as_str());
            out.push(' ');
            last = tag.end();
        }
        out.push_str(&NON_WORD.replace_all(&text[last..], " "));

        // ── Step 6: collapse whitespace ───────────────────────────────────────
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for CommentNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer for CommentNormalizer {
    fn normalize(&self, text: &str) -> String {
        self.clean(text)
    }
}
