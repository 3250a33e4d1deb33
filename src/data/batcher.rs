// ============================================================
// Layer 4 — Encoding Batcher
// ============================================================
// Stacks tokenised texts into model-ready tensors.
//
//   Input:  N encodings of (possibly) different lengths
//   Output: EncodedBatch with tensors of shape [N, S]
//           where S is the longest encoding in the batch
//
// Shorter encodings are padded with id 0 and mask 0, so the
// attention layers can ignore the padding positions.

use burn::prelude::*;

/// One tokenised text: ids plus attention mask (1 = real token)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    pub input_ids:      Vec<u32>,
    pub attention_mask: Vec<u32>,
}

impl EncodedText {
    pub fn new(input_ids: Vec<u32>, attention_mask: Vec<u32>) -> Self {
        Self { input_ids, attention_mask }
    }
}

#[derive(Debug, Clone)]
pub struct EncodedBatch<B: Backend> {
    /// Token ID sequences — shape: [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// Attention masks — shape: [batch_size, seq_len], 0 = padding
    pub attention_mask: Tensor<B, 2, Int>,
}

#[derive(Clone, Debug)]
pub struct EncodingBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> EncodingBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Pad every encoding to the longest one and build [N, S] tensors.
    /// `items` must not be empty.
    pub fn batch(&self, items: &[EncodedText]) -> EncodedBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.iter().map(|item| item.input_ids.len()).max().unwrap_or(0).max(1);

        let (input_flat, mask_flat) = pad_and_flatten(items, seq_len);

        let input_ids = Tensor::<B, 1, Int>::from_ints(input_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let attention_mask = Tensor::<B, 1, Int>::from_ints(mask_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        EncodedBatch { input_ids, attention_mask }
    }
}

/// Row-major flattening of ids and masks, each row padded to `seq_len`
fn pad_and_flatten(items: &[EncodedText], seq_len: usize) -> (Vec<i32>, Vec<i32>) {
    let mut ids  = Vec::with_capacity(items.len() * seq_len);
    let mut mask = Vec::with_capacity(items.len() * seq_len);

    for item in items {
        ids.extend(item.input_ids.iter().take(seq_len).map(|&x| x as i32));
        mask.extend(item.attention_mask.iter().take(seq_len).map(|&x| x as i32));
        ids.resize(ids.len() + seq_len - item.input_ids.len().min(seq_len), 0);
        // the mask may be shorter than the ids if a caller built it by hand
        mask.resize(ids.len(), 0);
    }

    (ids, mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_to_longest() {
        let items = vec![
            EncodedText::new(vec![101, 7, 102], vec![1, 1, 1]),
            EncodedText::new(vec![101, 102], vec![1, 1]),
        ];
        let (ids, mask) = pad_and_flatten(&items, 3);
        assert_eq!(ids, vec![101, 7, 102, 101, 102, 0]);
        assert_eq!(mask, vec![1, 1, 1, 1, 1, 0]);
    }

    #[test]
    fn test_batch_tensor_shape() {
        type B = burn::backend::NdArray;
        let batcher = EncodingBatcher::<B>::new(Default::default());
        let batch   = batcher.batch(&[
            EncodedText::new(vec![101, 5, 6, 102], vec![1, 1, 1, 1]),
            EncodedText::new(vec![101, 102], vec![1, 1]),
        ]);
        assert_eq!(batch.input_ids.dims(), [2, 4]);
        assert_eq!(batch.attention_mask.dims(), [2, 4]);
    }
}
