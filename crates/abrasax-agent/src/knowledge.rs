//! Knowledge sync: seed artifact → knowledge vector
//!
//! A seed artifact is arbitrary bytes. When it carries the distillation
//! marker anywhere, its final `KNOWLEDGE_DIM * 8` bytes are the knowledge
//! layer: `KNOWLEDGE_DIM` consecutive little-endian f64 values.
//! Anything else yields the all-zero vector. Never fails.

use abrasax_core::{KnowledgeVector, KNOWLEDGE_DIM};
use std::path::Path;
use tracing::{info, warn};

pub const DISTILLATION_MARKER: &[u8] = b"---WEIGHT_DISTILLATION_LAYER---";

/// Byte length of the trailing knowledge layer.
pub const LAYER_BYTES: usize = KNOWLEDGE_DIM * 8;

/// Read a seed artifact from disk and derive its knowledge vector.
pub fn sync(seed_path: &Path) -> KnowledgeVector {
    let data = match std::fs::read(seed_path) {
        Ok(d) => d,
        Err(e) => {
            info!("No seed at {} ({}), using base seed", seed_path.display(), e);
            return KnowledgeVector::zeros();
        }
    };

    match parse(&data) {
        Some(v) => {
            info!("Synced crystal knowledge layer from {}", seed_path.display());
            v
        }
        None => {
            warn!(
                "Knowledge layer missing in {} ({} bytes), using base seed",
                seed_path.display(),
                data.len()
            );
            KnowledgeVector::zeros()
        }
    }
}

/// Parse raw artifact bytes. `None` when the marker is absent or the artifact
/// is too short to hold a full layer.
pub fn parse(data: &[u8]) -> Option<KnowledgeVector> {
    if data.len() < LAYER_BYTES || !contains_marker(data) {
        return None;
    }
    let layer = &data[data.len() - LAYER_BYTES..];
    let values = layer
        .chunks_exact(8)
        .map(|chunk| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            f64::from_le_bytes(buf)
        })
        .collect();
    KnowledgeVector::from_values(values)
}

fn contains_marker(data: &[u8]) -> bool {
    data.windows(DISTILLATION_MARKER.len())
        .any(|w| w == DISTILLATION_MARKER)
}

/// Build a seed artifact: `prefix`, the marker, then the little-endian layer.
pub fn encode_seed(prefix: &[u8], values: &[f64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(prefix.len() + DISTILLATION_MARKER.len() + values.len() * 8);
    out.extend_from_slice(prefix);
    out.extend_from_slice(DISTILLATION_MARKER);
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_detection() {
        assert!(contains_marker(b"xx---WEIGHT_DISTILLATION_LAYER---yy"));
        assert!(!contains_marker(b"---WEIGHT_DISTILLATION_LAYER--"));
        assert!(!contains_marker(b""));
    }

    #[test]
    fn marker_may_sit_inside_the_layer() {
        // Only presence matters, not position.
        let mut data = vec![0u8; LAYER_BYTES];
        data[100..100 + DISTILLATION_MARKER.len()].copy_from_slice(DISTILLATION_MARKER);
        let v = parse(&data).unwrap();
        assert_eq!(v.len(), KNOWLEDGE_DIM);
    }
}
