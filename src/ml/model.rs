// ============================================================
// Layer 5 — Encoder Models
// ============================================================
// One transformer encoder shared by two heads:
//
//   SequenceClassifierModel — [CLS] pooler → spam / non-spam logits
//   TokenClassifierModel    — per-token BIO logits
//
// Padding positions are masked out of self-attention, so a text
// gets the same logits whether or not it was padded in a batch.

use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

/// Number of BIO classes: O, B-SITE, I-SITE, B-GENERAL, I-GENERAL
pub const NUM_TOKEN_LABELS: usize = 5;

/// Number of comment classes: non-spam, spam
pub const NUM_SEQUENCE_LABELS: usize = 2;

/// Architecture of both models, stored next to the weights as `model_config.json`
#[derive(Config, Debug)]
pub struct EncoderConfig {
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
    pub num_labels:  usize,
    #[config(default = 0.0)]
    pub dropout:     f64,
}

impl EncoderConfig {
    fn init_encoder<B: Backend>(&self, device: &B::Device) -> TransformerEncoder<B> {
        let token_embedding    = EmbeddingConfig::new(self.vocab_size, self.d_model).init(device);
        let position_embedding = EmbeddingConfig::new(self.max_seq_len, self.d_model).init(device);
        let blocks = (0..self.num_layers).map(|_| self.init_block(device)).collect();
        let final_norm = LayerNormConfig::new(self.d_model).init(device);
        let dropout    = DropoutConfig::new(self.dropout).init();
        TransformerEncoder {
            token_embedding, position_embedding, blocks, final_norm, dropout,
        }
    }

    fn init_block<B: Backend>(&self, device: &B::Device) -> EncoderBlock<B> {
        let self_attn   = MultiHeadAttentionConfig::new(self.d_model, self.num_heads)
            .with_dropout(self.dropout)
            .init(device);
        let ffn_up    = LinearConfig::new(self.d_model, self.d_ff).init(device);
        let ffn_down  = LinearConfig::new(self.d_ff, self.d_model).init(device);
        let attn_norm = LayerNormConfig::new(self.d_model).init(device);
        let ffn_norm  = LayerNormConfig::new(self.d_model).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        EncoderBlock { self_attn, ffn_up, ffn_down, attn_norm, ffn_norm, dropout }
    }

    /// Encoder + [CLS] pooler + per-sequence head
    pub fn init_sequence_classifier<B: Backend>(&self, device: &B::Device) -> SequenceClassifierModel<B> {
        SequenceClassifierModel {
            encoder:    self.init_encoder(device),
            pooler:     LinearConfig::new(self.d_model, self.d_model).init(device),
            classifier: LinearConfig::new(self.d_model, self.num_labels).init(device),
        }
    }

    /// Encoder + per-token head
    pub fn init_token_classifier<B: Backend>(&self, device: &B::Device) -> TokenClassifierModel<B> {
        TokenClassifierModel {
            encoder:    self.init_encoder(device),
            classifier: LinearConfig::new(self.d_model, self.num_labels).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct EncoderBlock<B: Backend> {
    pub self_attn:   MultiHeadAttention<B>,
    pub ffn_up:      Linear<B>,
    pub ffn_down:    Linear<B>,
    pub attn_norm:   LayerNorm<B>,
    pub ffn_norm:    LayerNorm<B>,
    pub dropout:     Dropout,
}

impl<B: Backend> EncoderBlock<B> {
    /// `pad_mask`: [batch, seq_len], true where the position is padding
    pub fn forward(&self, x: Tensor<B, 3>, pad_mask: Tensor<B, 2, Bool>) -> Tensor<B, 3> {
        let attn_input  = MhaInput::self_attn(x.clone()).mask_pad(pad_mask);
        let attn_output = self.self_attn.forward(attn_input).context;
        let hidden = self.attn_norm.forward(x + self.dropout.forward(attn_output));

        let expanded = burn::tensor::activation::gelu(self.ffn_up.forward(hidden.clone()));
        let projected = self.ffn_down.forward(expanded);
        self.ffn_norm.forward(hidden + self.dropout.forward(projected))
    }
}

#[derive(Module, Debug)]
pub struct TransformerEncoder<B: Backend> {
    pub token_embedding:    Embedding<B>,
    pub position_embedding: Embedding<B>,
    pub blocks:             Vec<EncoderBlock<B>>,
    pub final_norm:         LayerNorm<B>,
    pub dropout:            Dropout,
}

impl<B: Backend> TransformerEncoder<B> {
    /// input_ids, attention_mask: [batch, seq_len] → hidden states [batch, seq_len, d_model]
    pub fn forward(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
    ) -> Tensor<B, 3> {
        let [batch_size, seq_len] = input_ids.dims();

        let tok_emb = self.token_embedding.forward(input_ids);

        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &tok_emb.device())
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let pos_emb = self.position_embedding.forward(positions);

        let pad_mask = attention_mask.equal_elem(0);

        let mut x = self.dropout.forward(tok_emb + pos_emb);

        for block in &self.blocks {
            x = block.forward(x, pad_mask.clone());
        }
        self.final_norm.forward(x)
    }
}

#[derive(Module, Debug)]
pub struct SequenceClassifierModel<B: Backend> {
    pub encoder:    TransformerEncoder<B>,
    pub pooler:     Linear<B>,
    pub classifier: Linear<B>,
}

impl<B: Backend> SequenceClassifierModel<B> {
    /// → logits [batch, num_labels]
    pub fn forward(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
    ) -> Tensor<B, 2> {
        let hidden = self.encoder.forward(input_ids, attention_mask);
        let [batch_size, _, d_model] = hidden.dims();

        // The first position is always [CLS]
        let cls = hidden
            .slice([0..batch_size, 0..1, 0..d_model])
            .reshape([batch_size, d_model]);
        let pooled = self.pooler.forward(cls).tanh();
        self.classifier.forward(pooled)
    }
}

#[derive(Module, Debug)]
pub struct TokenClassifierModel<B: Backend> {
    pub encoder:    TransformerEncoder<B>,
    pub classifier: Linear<B>,
}

impl<B: Backend> TokenClassifierModel<B> {
    /// → logits [batch, seq_len, num_labels]
    pub fn forward(
        &self,
        input_ids:      Tensor<B, 2, Int>,
        attention_mask: Tensor<B, 2, Int>,
    ) -> Tensor<B, 3> {
        let hidden = self.encoder.forward(input_ids, attention_mask);
        self.classifier.forward(hidden)
    }
}

/// Index of the largest value in each consecutive row of `width` values
pub fn argmax_rows(values: &[f32], width: usize) -> Vec<usize> {
    values
        .chunks(width.max(1))
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f32::NEG_INFINITY), |best, (i, &v)| if v > best.1 { (i, v) } else { best })
                .0
        })
        .collect()
}
