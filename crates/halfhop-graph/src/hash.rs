use sha2::{Digest, Sha256};

use crate::features::Scalar;
use crate::graph::{AttrValue, Graph};

/// Computes the canonical content hash for the provided graph.
///
/// Covers dtype, feature shape and bit patterns, edge columns in order, the
/// slow node mask and every attribute. Edge order is significant.
pub fn canonical_hash<T: Scalar>(graph: &Graph<T>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(T::DTYPE.as_bytes());

    hasher.update((graph.num_nodes() as u64).to_le_bytes());
    hasher.update((graph.num_features() as u64).to_le_bytes());
    for value in graph.x.as_slice() {
        hasher.update(value.bits().to_le_bytes());
    }

    hasher.update((graph.num_edges() as u64).to_le_bytes());
    for (src, dst) in graph.edge_index.iter() {
        hasher.update((src as u64).to_le_bytes());
        hasher.update((dst as u64).to_le_bytes());
    }

    match &graph.slow_node_mask {
        None => hasher.update(b"mask:none"),
        Some(mask) => {
            hasher.update(b"mask:some");
            hasher.update((mask.len() as u64).to_le_bytes());
            hasher.update(mask.iter().map(|slow| u8::from(*slow)).collect::<Vec<_>>());
        }
    }

    hasher.update((graph.attrs.len() as u64).to_le_bytes());
    for (key, value) in &graph.attrs {
        update_bytes(key.as_bytes(), &mut hasher);
        encode_attr(value, &mut hasher);
    }

    format!("{:x}", hasher.finalize())
}

fn encode_attr(value: &AttrValue, hasher: &mut Sha256) {
    match value {
        AttrValue::Bool(flag) => {
            hasher.update(b"bool");
            hasher.update([u8::from(*flag)]);
        }
        AttrValue::Int(int) => {
            hasher.update(b"int");
            hasher.update(int.to_le_bytes());
        }
        AttrValue::Float(float) => {
            hasher.update(b"float");
            hasher.update(float.to_bits().to_le_bytes());
        }
        AttrValue::Text(text) => {
            hasher.update(b"text");
            update_bytes(text.as_bytes(), hasher);
        }
        AttrValue::Ints(ints) => {
            hasher.update(b"ints");
            hasher.update((ints.len() as u64).to_le_bytes());
            for int in ints {
                hasher.update(int.to_le_bytes());
            }
        }
        AttrValue::Floats(floats) => {
            hasher.update(b"floats");
            hasher.update((floats.len() as u64).to_le_bytes());
            for float in floats {
                hasher.update(float.to_bits().to_le_bytes());
            }
        }
    }
}

fn update_bytes(bytes: &[u8], hasher: &mut Sha256) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
