use halfhop_core::rng::RngHandle;
use halfhop_graph::EdgeIndex;
use rand::Rng;

/// Partition of an edge index into the three groups the rewrite consumes.
///
/// Every group keeps the original column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSelection {
    /// Non-self-loop edges copied verbatim.
    pub kept: Vec<(usize, usize)>,
    /// Self-loop edges, never half-hopped.
    pub self_loops: Vec<(usize, usize)>,
    /// Non-self-loop edges replaced by a slow node.
    pub hopped: Vec<(usize, usize)>,
}

/// Draws one activation per node: node `i` is active iff its draw is below `p`.
///
/// Consumes exactly `num_nodes` uniform `f64` samples, in node order.
pub fn sample_active_nodes(num_nodes: usize, p: f64, rng: &mut RngHandle) -> Vec<bool> {
    (0..num_nodes).map(|_| rng.gen::<f64>() < p).collect()
}

/// Splits `edge_index` into kept, self-loop and half-hopped edges.
///
/// With `p == 1` every non-self-loop edge is half-hopped and no randomness is
/// consumed. Otherwise an edge is half-hopped iff its target node is active.
pub fn select_edges(
    edge_index: &EdgeIndex,
    num_nodes: usize,
    p: f64,
    rng: &mut RngHandle,
) -> EdgeSelection {
    let active = (p < 1.0).then(|| sample_active_nodes(num_nodes, p, rng));
    let mut selection = EdgeSelection::default();
    for (src, dst) in edge_index.iter() {
        if src == dst {
            selection.self_loops.push((src, dst));
            continue;
        }
        let hop = match &active {
            None => true,
            Some(active) => active.get(dst).copied().unwrap_or(false),
        };
        if hop {
            selection.hopped.push((src, dst));
        } else {
            selection.kept.push((src, dst));
        }
    }
    tracing::trace!(
        kept = selection.kept.len(),
        self_loops = selection.self_loops.len(),
        hopped = selection.hopped.len(),
        "edge selection"
    );
    selection
}
