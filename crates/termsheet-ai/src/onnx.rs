//! ONNX Runtime sentence encoder for sentence-transformers models.
//!
//! Mean-pooled embeddings from a model directory holding `model.onnx` and
//! `tokenizer.json` (e.g. all-MiniLM-L6-v2, 384 dimensions).

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::info;

use crate::AnalysisError;
use crate::encoder::{ClauseEncoder, normalize};

/// Sentence encoder backed by ONNX Runtime.
///
/// The inference call is not reentrant, so the session sits behind a mutex
/// and concurrent analyses serialize there. Load once per process and share.
pub struct OnnxEncoder {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    dim: usize,
}

impl OnnxEncoder {
    /// Loads a model from a directory containing `model.onnx` and
    /// `tokenizer.json`.
    pub fn load(model_dir: &Path) -> Result<Self, AnalysisError> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");
        if !model_path.exists() {
            return Err(AnalysisError::ModelUnavailable(format!(
                "model.onnx not found in {}",
                model_dir.display()
            )));
        }
        if !tokenizer_path.exists() {
            return Err(AnalysisError::ModelUnavailable(format!(
                "tokenizer.json not found in {}",
                model_dir.display()
            )));
        }

        let session = Session::builder()
            .and_then(|builder| builder.commit_from_file(&model_path))
            .map_err(|e| AnalysisError::ModelUnavailable(e.to_string()))?;

        // Infer embedding dimension from the model output shape.
        let dim = infer_dim(session.outputs()[0].dtype()).unwrap_or(384);

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| AnalysisError::ModelUnavailable(format!("load tokenizer: {e}")))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: 256,
                ..Default::default()
            }))
            .map_err(|e| AnalysisError::ModelUnavailable(format!("set truncation: {e}")))?;
        tokenizer.with_padding(Some(tokenizers::PaddingParams::default()));

        info!(dim, model = %model_path.display(), "loaded embedding model");
        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            dim,
        })
    }
}

impl ClauseEncoder for OnnxEncoder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AnalysisError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        let batch_size = texts.len();

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| AnalysisError::EncodingFailed(format!("tokenize: {e}")))?;
        let seq_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        // Flat input tensors: [batch_size, seq_len].
        let mut input_ids = vec![0i64; batch_size * seq_len];
        let mut attention_mask = vec![0i64; batch_size * seq_len];
        let mut token_type_ids = vec![0i64; batch_size * seq_len];
        for (i, encoding) in encodings.iter().enumerate() {
            let offset = i * seq_len;
            for (j, &id) in encoding.get_ids().iter().enumerate() {
                input_ids[offset + j] = id as i64;
            }
            for (j, &mask) in encoding.get_attention_mask().iter().enumerate() {
                attention_mask[offset + j] = mask as i64;
            }
            for (j, &tid) in encoding.get_type_ids().iter().enumerate() {
                token_type_ids[offset + j] = tid as i64;
            }
        }

        let shape = [batch_size as i64, seq_len as i64];
        let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))
            .map_err(|e| AnalysisError::EncodingFailed(e.to_string()))?;
        let mask_tensor = Tensor::from_array((shape, attention_mask.clone().into_boxed_slice()))
            .map_err(|e| AnalysisError::EncodingFailed(e.to_string()))?;
        let type_tensor = Tensor::from_array((shape, token_type_ids.into_boxed_slice()))
            .map_err(|e| AnalysisError::EncodingFailed(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| AnalysisError::EncodingFailed("inference lock poisoned".into()))?;
        let outputs = session
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
                "token_type_ids" => type_tensor,
            ])
            .map_err(|e| AnalysisError::EncodingFailed(e.to_string()))?;

        // Token embeddings: [batch_size, seq_len, dim].
        let (output_shape, output_data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| AnalysisError::EncodingFailed(e.to_string()))?;
        let dims: &[i64] = output_shape;
        if dims.len() != 3 || dims[0] as usize != batch_size || dims[2] as usize != self.dim {
            return Err(AnalysisError::EncodingFailed(format!(
                "unexpected output shape {dims:?}, expected [{batch_size}, {seq_len}, {}]",
                self.dim
            )));
        }
        let actual_seq_len = dims[1] as usize;

        // Mean pooling with the attention mask, then unit norm.
        let mut embeddings = Vec::with_capacity(batch_size);
        for i in 0..batch_size {
            let mut pooled = vec![0.0f32; self.dim];
            let mut token_count = 0.0f32;
            for j in 0..actual_seq_len {
                let mask_val = attention_mask[i * seq_len + j] as f32;
                if mask_val > 0.0 {
                    let offset = (i * actual_seq_len + j) * self.dim;
                    for (d, p) in pooled.iter_mut().enumerate() {
                        *p += output_data[offset + d] * mask_val;
                    }
                    token_count += mask_val;
                }
            }
            if token_count > 0.0 {
                for p in &mut pooled {
                    *p /= token_count;
                }
            }
            normalize(&mut pooled);
            embeddings.push(pooled);
        }

        Ok(embeddings)
    }
}

/// Try to infer the embedding dimension from the ONNX model output type.
fn infer_dim(output_type: &ort::value::ValueType) -> Option<usize> {
    match output_type {
        ort::value::ValueType::Tensor { shape, .. } => {
            // Last dimension is the embedding dim.
            shape
                .last()
                .and_then(|&d| if d > 0 { Some(d as usize) } else { None })
        }
        _ => None,
    }
}
