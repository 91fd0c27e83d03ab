//! Little-endian matrix blobs.
//!
//! Embeddings: `count: u32, dims: u32`, then `count·dims` f32.
//! Statevectors: `count: u32, dim: u32`, then `count·dim` (re: f64, im: f64).
//! The body length must match the header exactly.

use qrerank_core::errors::ArtifactError;
use qrerank_quantum::Complex64;

const HEADER_LEN: usize = 8;

/// Decoded embedding matrix, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    pub count: usize,
    pub dims: usize,
    pub values: Vec<f32>,
}

impl EmbeddingMatrix {
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.values.chunks_exact(self.dims.max(1))
    }
}

/// Decoded statevector matrix, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct StateMatrix {
    pub count: usize,
    pub dim: usize,
    pub amplitudes: Vec<Complex64>,
}

impl StateMatrix {
    pub fn rows(&self) -> impl Iterator<Item = &[Complex64]> {
        self.amplitudes.chunks_exact(self.dim.max(1))
    }
}

pub fn encode_embeddings<R: AsRef<[f32]>>(rows: &[R], dims: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + rows.len() * dims * 4);
    out.extend_from_slice(&(rows.len() as u32).to_le_bytes());
    out.extend_from_slice(&(dims as u32).to_le_bytes());
    for row in rows {
        for v in row.as_ref() {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }
    out
}

pub fn decode_embeddings(bytes: &[u8], path: &str) -> Result<EmbeddingMatrix, ArtifactError> {
    let (count, dims) = header(bytes, path)?;
    let body = body(bytes, count, dims, 4, path)?;
    let values = body
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Ok(EmbeddingMatrix {
        count,
        dims,
        values,
    })
}

pub fn encode_statevectors<R: AsRef<[Complex64]>>(rows: &[R], dim: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + rows.len() * dim * 16);
    out.extend_from_slice(&(rows.len() as u32).to_le_bytes());
    out.extend_from_slice(&(dim as u32).to_le_bytes());
    for row in rows {
        for a in row.as_ref() {
            out.extend_from_slice(&a.re.to_le_bytes());
            out.extend_from_slice(&a.im.to_le_bytes());
        }
    }
    out
}

pub fn decode_statevectors(bytes: &[u8], path: &str) -> Result<StateMatrix, ArtifactError> {
    let (count, dim) = header(bytes, path)?;
    let body = body(bytes, count, dim, 16, path)?;
    let amplitudes = body
        .chunks_exact(16)
        .map(|c| Complex64::new(read_f64(&c[..8]), read_f64(&c[8..])))
        .collect();
    Ok(StateMatrix {
        count,
        dim,
        amplitudes,
    })
}

fn read_f64(b: &[u8]) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(b);
    f64::from_le_bytes(buf)
}

fn read_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let b = bytes.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fn header(bytes: &[u8], path: &str) -> Result<(usize, usize), ArtifactError> {
    match (read_u32(bytes, 0), read_u32(bytes, 4)) {
        (Some(count), Some(width)) => Ok((count as usize, width as usize)),
        _ => Err(ArtifactError::Corrupt {
            path: path.to_string(),
            reason: format!("truncated header ({} bytes)", bytes.len()),
        }),
    }
}

fn body<'a>(
    bytes: &'a [u8],
    count: usize,
    width: usize,
    elem_size: usize,
    path: &str,
) -> Result<&'a [u8], ArtifactError> {
    let expected = count
        .checked_mul(width)
        .and_then(|n| n.checked_mul(elem_size))
        .and_then(|n| n.checked_add(HEADER_LEN));
    match expected {
        Some(len) if len == bytes.len() => Ok(&bytes[HEADER_LEN..]),
        _ => Err(ArtifactError::Corrupt {
            path: path.to_string(),
            reason: format!(
                "header declares {count}×{width} elements but file has {} bytes",
                bytes.len()
            ),
        }),
    }
}
