// ============================================================
// Layer 5 — Keyword Tagger
// ============================================================
// Token classification of one cleaned text. Produces the
// (token, label id, offset) triples the span decoder consumes.
//
// Special tokens ([CLS], [SEP], [PAD]) are reported with no
// offset so that decoding skips them.
use anyhow::Result;
use std::path::Path;
use tokenizers::{Encoding, Tokenizer};

use crate::data::batcher::{EncodedText, EncodingBatcher};
use crate::domain::entity::{LabeledToken, Token};
use crate::domain::traits::TokenLabeler;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::model::{argmax_rows, TokenClassifierModel, NUM_TOKEN_LABELS};
use crate::ml::{check_max_length, InferBackend};

pub struct KeywordTagger {
    model:     TokenClassifierModel<InferBackend>,
    tokenizer: Tokenizer,
    batcher:   EncodingBatcher<InferBackend>,
}

impl KeywordTagger {
    pub fn from_dir(dir: &Path, max_length: usize) -> Result<Self> {
        let device = burn::backend::wgpu::WgpuDevice::default();
        let ckpt   = CheckpointManager::new(dir);
        let cfg    = ckpt.load_config()?;
        check_max_length(&cfg, max_length)?;
        anyhow::ensure!(
            cfg.num_labels == NUM_TOKEN_LABELS,
            "Token model in '{}' has {} labels, expected {}",
            dir.display(),
            cfg.num_labels,
            NUM_TOKEN_LABELS
        );

        let model = cfg.init_token_classifier::<InferBackend>(&device);
        let model = ckpt.load_weights::<InferBackend, _>(model, &device)?;
        let tokenizer = TokenizerStore::new(dir).load_for_inference(max_length)?;

        tracing::info!("Keyword tagger loaded from '{}'", dir.display());
        Ok(Self { model, tokenizer, batcher: EncodingBatcher::new(device) })
    }
}

impl TokenLabeler for KeywordTagger {
    fn label_tokens(&self, text: &str) -> Result<Vec<LabeledToken>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow::anyhow!("Tokenise: {e}"))?;
        if encoding.get_ids().is_empty() {
            return Ok(Vec::new());
        }

        let item  = EncodedText::new(encoding.get_ids().to_vec(), encoding.get_attention_mask().to_vec());
        let batch = self.batcher.batch(std::slice::from_ref(&item));

        let logits = self.model.forward(batch.input_ids, batch.attention_mask);
        let [_, _, num_labels] = logits.dims();
        let scores = logits
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Read tagger output: {e:?}"))?;
        let label_ids = argmax_rows(&scores, num_labels);

        Ok(zip_labels(&encoding, &label_ids))
    }
}

/// Pair every token of `encoding` with its predicted label id
fn zip_labels(encoding: &Encoding, label_ids: &[usize]) -> Vec<LabeledToken> {
    let tokens  = encoding.get_tokens();
    let offsets = encoding.get_offsets();
    let special = encoding.get_special_tokens_mask();

    tokens
        .iter()
        .zip(offsets)
        .zip(special)
        .zip(label_ids)
        .map(|(((text, &offset), &is_special), &label)| {
            let token = if is_special == 0 {
                Token::new(text.clone(), Some(offset))
            } else {
                Token::special(text.clone())
            };
            LabeledToken::new(token, label as u32)
        })
        .collect()
}
