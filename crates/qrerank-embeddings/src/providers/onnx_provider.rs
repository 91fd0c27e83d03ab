//! ONNX Runtime embedding provider.
//!
//! Loads a sentence-embedding model (all-MiniLM-L6-v2 by default, 384-dim)
//! through the `ort` crate together with the model's own `tokenizer.json`,
//! and mean-pools the token outputs over the attention mask.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use qrerank_core::errors::{EmbeddingError, QrerankResult};
use qrerank_core::traits::IEmbeddingProvider;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

/// Longest token sequence fed to the model, including [CLS] and [SEP].
const MAX_SEQUENCE_LEN: usize = 256;
const TOKENIZER_FILE: &str = "tokenizer.json";
const TOKEN_TYPE_IDS_INPUT: &str = "token_type_ids";

/// Model inputs for one text.
#[derive(Debug, Clone, PartialEq)]
struct EncodedText {
    input_ids: Vec<i64>,
    attention_mask: Vec<i64>,
    token_type_ids: Vec<i64>,
}

impl EncodedText {
    fn len(&self) -> usize {
        self.input_ids.len()
    }
}

/// ONNX-based embedding provider.
pub struct OnnxProvider {
    /// `Session::run` needs `&mut`; the mutex gives each inference exclusive
    /// use of the session's scratch buffers.
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    /// BERT exports declare a segment input; some distilled exports drop it.
    takes_token_type_ids: bool,
    dimensions: usize,
    model_name: String,
}

impl OnnxProvider {
    /// Load an ONNX model and its tokenizer.
    ///
    /// `tokenizer_path` defaults to `tokenizer.json` beside the model.
    ///
    /// # Errors
    /// Returns `EmbeddingError::ModelLoadFailed` if either file cannot be loaded.
    pub fn load(
        model_path: &str,
        tokenizer_path: Option<&str>,
        dimensions: usize,
    ) -> QrerankResult<Self> {
        let path = Path::new(model_path);
        if !path.exists() {
            return Err(EmbeddingError::ModelLoadFailed {
                path: model_path.to_string(),
                reason: "model file not found".to_string(),
            }
            .into());
        }

        let tokenizer_path = tokenizer_path
            .map(PathBuf::from)
            .unwrap_or_else(|| path.with_file_name(TOKENIZER_FILE));
        let tokenizer = load_tokenizer(&tokenizer_path)?;

        let session = Session::builder()
            .map_err(|e| EmbeddingError::ModelLoadFailed {
                path: model_path.to_string(),
                reason: e.to_string(),
            })?
            .with_intra_threads(2)
            .map_err(|e| EmbeddingError::ModelLoadFailed {
                path: model_path.to_string(),
                reason: e.to_string(),
            })?
            .commit_from_file(model_path)
            .map_err(|e| EmbeddingError::ModelLoadFailed {
                path: model_path.to_string(),
                reason: e.to_string(),
            })?;

        let takes_token_type_ids = session
            .inputs()
            .iter()
            .any(|input| input.name() == TOKEN_TYPE_IDS_INPUT);

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx-model")
            .to_string();

        debug!(
            model = %model_name,
            tokenizer = %tokenizer_path.display(),
            dims = dimensions,
            takes_token_type_ids,
            "ONNX model loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            takes_token_type_ids,
            dimensions,
            model_name,
        })
    }

    fn infer(&self, text: &str) -> QrerankResult<Vec<f32>> {
        let encoded = encode_text(&self.tokenizer, text)?;
        let seq_len = encoded.len();
        let shape = vec![1i64, seq_len as i64];

        let ids_tensor = Tensor::from_array((shape.clone(), encoded.input_ids)).map_err(|e| {
            EmbeddingError::InferenceFailed {
                reason: format!("tensor creation error: {e}"),
            }
        })?;
        let mask_tensor = Tensor::from_array((shape.clone(), encoded.attention_mask.clone()))
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("tensor creation error: {e}"),
            })?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("session lock poisoned: {e}"),
            })?;

        let outputs = if self.takes_token_type_ids {
            let type_tensor = Tensor::from_array((shape, encoded.token_type_ids)).map_err(|e| {
                EmbeddingError::InferenceFailed {
                    reason: format!("tensor creation error: {e}"),
                }
            })?;
            session.run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
                TOKEN_TYPE_IDS_INPUT => type_tensor
            ])
        } else {
            session.run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor
            ])
        }
        .map_err(|e| EmbeddingError::InferenceFailed {
            reason: e.to_string(),
        })?;

        let (_name, output) =
            outputs
                .iter()
                .next()
                .ok_or_else(|| EmbeddingError::InferenceFailed {
                    reason: "no output tensor".to_string(),
                })?;

        let (shape, data) =
            output
                .try_extract_tensor::<f32>()
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("tensor extraction failed: {e}"),
                })?;

        let mut pooled = match shape.len() {
            // [batch=1, seq, dims]: mean over attended tokens.
            3 => {
                let seq = shape[1] as usize;
                let dims = shape[2] as usize;
                if seq != seq_len || data.len() < seq * dims {
                    return Err(EmbeddingError::InferenceFailed {
                        reason: format!("output shape {shape:?} does not cover {seq_len} tokens"),
                    }
                    .into());
                }
                mean_pool(data, &encoded.attention_mask, dims)
            }
            // [batch=1, dims]: the model pools internally.
            2 => data[..shape[1] as usize].to_vec(),
            _ => {
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!("unexpected output shape: {shape:?}"),
                }
                .into())
            }
        };

        if pooled.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: pooled.len(),
            }
            .into());
        }

        crate::normalize::l2_normalize(&mut pooled);
        Ok(pooled)
    }
}

fn load_tokenizer(path: &Path) -> QrerankResult<Tokenizer> {
    let load_failed = |reason: String| EmbeddingError::ModelLoadFailed {
        path: path.display().to_string(),
        reason,
    };
    let mut tokenizer =
        Tokenizer::from_file(path).map_err(|e| load_failed(format!("tokenizer: {e}")))?;
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: MAX_SEQUENCE_LEN,
            ..Default::default()
        }))
        .map_err(|e| load_failed(format!("tokenizer truncation: {e}")))?;
    Ok(tokenizer)
}

/// WordPiece-encode `text` with special tokens, truncated to the model window.
fn encode_text(tokenizer: &Tokenizer, text: &str) -> QrerankResult<EncodedText> {
    let encoding = tokenizer
        .encode(text, true)
        .map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("tokenization failed: {e}"),
        })?;
    let widen = |xs: &[u32]| xs.iter().map(|&x| i64::from(x)).collect::<Vec<i64>>();
    Ok(EncodedText {
        input_ids: widen(encoding.get_ids()),
        attention_mask: widen(encoding.get_attention_mask()),
        token_type_ids: vec![0; encoding.get_ids().len()],
    })
}

/// Average the `[seq, dims]` token rows whose mask is set.
fn mean_pool(data: &[f32], mask: &[i64], dims: usize) -> Vec<f32> {
    let mut pooled = vec![0.0f32; dims];
    let mut attended = 0usize;
    for (row, _) in data.chunks_exact(dims).zip(mask).filter(|(_, m)| **m != 0) {
        for (acc, &x) in pooled.iter_mut().zip(row) {
            *acc += x;
        }
        attended += 1;
    }
    for v in &mut pooled {
        *v /= attended.max(1) as f32;
    }
    pooled
}

impl IEmbeddingProvider for OnnxProvider {
    fn embed(&self, text: &str) -> QrerankResult<Vec<f32>> {
        self.infer(text)
    }

    fn embed_batch(&self, texts: &[String]) -> QrerankResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.infer(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model_name
    }

    fn is_available(&self) -> bool {
        true
    }
}
