use halfhop_core::errors::{ErrorInfo, HalfHopError};
use halfhop_core::rng::RngHandle;
use rand::Rng;

use crate::edge_index::EdgeIndex;
use crate::features::{FeatureMatrix, Scalar};
use crate::graph::Graph;

/// Generates a random directed graph with deterministic randomness.
///
/// Features are drawn uniformly from `[0, 1)`. Each edge is a self-loop with
/// probability `self_loop_fraction`; otherwise both endpoints are drawn
/// uniformly with distinct ids (single-node graphs only produce self-loops).
pub fn gen_random_graph<T: Scalar>(
    num_nodes: usize,
    num_edges: usize,
    feature_dim: usize,
    self_loop_fraction: f64,
    rng: &mut RngHandle,
) -> Result<Graph<T>, HalfHopError> {
    if !(0.0..=1.0).contains(&self_loop_fraction) {
        return Err(HalfHopError::Configuration(
            ErrorInfo::new(
                "self-loop-fraction-out-of-range",
                "self loop fraction must lie in [0, 1]",
            )
            .with_context("self_loop_fraction", self_loop_fraction.to_string()),
        ));
    }
    if num_nodes == 0 && num_edges > 0 {
        return Err(HalfHopError::Validation(
            ErrorInfo::new("empty-graph", "edges require at least one node")
                .with_context("num_edges", num_edges.to_string()),
        ));
    }

    let values: Vec<T> = (0..num_nodes * feature_dim)
        .map(|_| T::from_f64(rng.gen::<f64>()))
        .collect();
    let x = FeatureMatrix::new(num_nodes, feature_dim, values)?;

    let mut edge_index = EdgeIndex::with_capacity(num_edges);
    for _ in 0..num_edges {
        let src = rng.gen_range(0..num_nodes);
        if num_nodes == 1 || rng.gen_bool(self_loop_fraction) {
            edge_index.push(src, src);
            continue;
        }
        let mut dst = rng.gen_range(0..num_nodes - 1);
        if dst >= src {
            dst += 1;
        }
        edge_index.push(src, dst);
    }

    Graph::new(x, edge_index)
}
