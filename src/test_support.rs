// Deterministic stand-ins for the model collaborators, shared by unit tests.

use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::domain::entity::{LabeledToken, Token};
use crate::domain::traits::{SequenceClassifier, TextNormalizer, TokenLabeler};

/// Classifies each text with a closure and records every batch it receives
pub struct FnClassifier<F: Fn(&str) -> i64> {
    rule:        F,
    pub batches: RefCell<Vec<Vec<String>>>,
}

impl<F: Fn(&str) -> i64> FnClassifier<F> {
    pub fn new(rule: F) -> Self {
        Self { rule, batches: RefCell::new(Vec::new()) }
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.borrow().iter().map(Vec::len).collect()
    }
}

impl<F: Fn(&str) -> i64> SequenceClassifier for FnClassifier<F> {
    fn classify_batch(&self, texts: &[String]) -> Result<Vec<i64>> {
        self.batches.borrow_mut().push(texts.to_vec());
        Ok(texts.iter().map(|t| (self.rule)(t)).collect())
    }
}

/// Spam when the text mentions "judi", "slot" or "gacor"
pub fn keyword_rule(text: &str) -> i64 {
    let lower = text.to_lowercase();
    ["judi", "slot", "gacor"].iter().any(|w| lower.contains(w)) as i64
}

/// Whitespace tokenizer with [CLS]/[SEP] framing; words found in the
/// lexicon get their label id, everything else is O.
pub struct LexiconLabeler {
    lexicon: HashMap<String, u32>,
}

impl LexiconLabeler {
    pub fn new(entries: &[(&str, u32)]) -> Self {
        Self {
            lexicon: entries.iter().map(|(w, l)| (w.to_string(), *l)).collect(),
        }
    }
}

impl TokenLabeler for LexiconLabeler {
    fn label_tokens(&self, text: &str) -> Result<Vec<LabeledToken>> {
        let mut out = vec![LabeledToken::new(Token::special("[CLS]"), 0)];
        let mut pos = 0;
        for word in text.split_whitespace() {
            let start = pos + text[pos..].find(word).unwrap_or(0);
            let end   = start + word.len();
            let label = self.lexicon.get(word).copied().unwrap_or(0);
            out.push(LabeledToken::new(Token::new(word, Some((start, end))), label));
            pos = end;
        }
        out.push(LabeledToken::new(Token::special("[SEP]"), 0));
        Ok(out)
    }
}

/// Leaves text untouched
pub struct IdentityNormalizer;

impl TextNormalizer for IdentityNormalizer {
    fn normalize(&self, text: &str) -> String {
        text.to_string()
    }
}
