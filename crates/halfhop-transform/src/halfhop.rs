use std::fmt;

use halfhop_core::errors::HalfHopError;
use halfhop_core::rng::RngHandle;
use halfhop_graph::{EdgeIndex, FeatureMatrix, Graph, Scalar};
use serde::{Deserialize, Serialize};

use crate::config::HalfHopConfig;
use crate::selection::{select_edges, EdgeSelection};

/// Counts describing one half-hop rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfHopSummary {
    /// Node count before the rewrite.
    pub original_nodes: usize,
    /// Slow nodes appended, one per half-hopped edge.
    pub slow_nodes: usize,
    /// Non-self-loop edges copied verbatim.
    pub kept_edges: usize,
    /// Self-loop edges copied verbatim.
    pub self_loops: usize,
    /// Edge count after the rewrite.
    pub output_edges: usize,
}

/// Graph returned by [`HalfHop::apply`].
#[derive(Debug)]
pub enum Augmented<'g, T: Scalar> {
    /// The caller's graph, rewritten in place.
    InPlace(&'g mut Graph<T>),
    /// An independent rewritten copy; the caller's graph is untouched.
    Copied(Graph<T>),
}

impl<'g, T: Scalar> Augmented<'g, T> {
    /// Borrows the augmented graph.
    pub fn graph(&self) -> &Graph<T> {
        match self {
            Augmented::InPlace(graph) => &**graph,
            Augmented::Copied(graph) => graph,
        }
    }

    /// Returns an owned augmented graph, cloning when it was rewritten in place.
    pub fn into_owned(self) -> Graph<T> {
        match self {
            Augmented::InPlace(graph) => graph.clone(),
            Augmented::Copied(graph) => graph,
        }
    }
}

/// Half-hop augmentation.
///
/// Inserts one synthetic slow node per selected edge `(u, v)`, with features
/// `alpha * x[u] + (1 - alpha) * x[v]`, and replaces the edge with
/// `u -> s`, `s -> v` and `v -> s`. Edges are selected by sampling each node
/// active with probability `p` and hopping every non-self-loop edge whose
/// target is active; `p == 1` hops them all. Self-loops are never hopped.
///
/// The output edge index is laid out as kept edges, self-loops, then the
/// `u -> s`, `s -> v` and `v -> s` blocks, each in original edge order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfHop {
    config: HalfHopConfig,
}

impl HalfHop {
    /// Creates an in-place transform, validating `alpha` and `p`.
    pub fn new(alpha: f64, p: f64) -> Result<Self, HalfHopError> {
        Self::from_config(HalfHopConfig {
            alpha,
            p,
            ..HalfHopConfig::default()
        })
    }

    /// Creates a transform from a full configuration.
    pub fn from_config(config: HalfHopConfig) -> Result<Self, HalfHopError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Selects in-place or copy semantics for [`HalfHop::apply`].
    pub fn with_inplace(mut self, inplace: bool) -> Self {
        self.config.inplace = inplace;
        self
    }

    /// Interpolation weight.
    pub fn alpha(&self) -> f64 {
        self.config.alpha
    }

    /// Node activation probability.
    pub fn p(&self) -> f64 {
        self.config.p
    }

    /// Whether [`HalfHop::apply`] mutates its argument.
    pub fn inplace(&self) -> bool {
        self.config.inplace
    }

    /// The validated configuration.
    pub fn config(&self) -> &HalfHopConfig {
        &self.config
    }

    /// Applies the transform according to the configured `inplace` flag.
    pub fn apply<'g, T: Scalar>(
        &self,
        graph: &'g mut Graph<T>,
        rng: &mut RngHandle,
    ) -> Result<Augmented<'g, T>, HalfHopError> {
        if self.config.inplace {
            self.apply_in_place(graph, rng)?;
            Ok(Augmented::InPlace(graph))
        } else {
            self.apply_to_copy(graph, rng).map(Augmented::Copied)
        }
    }

    /// Rewrites `graph` in place. On error the graph is left untouched.
    pub fn apply_in_place<T: Scalar>(
        &self,
        graph: &mut Graph<T>,
        rng: &mut RngHandle,
    ) -> Result<HalfHopSummary, HalfHopError> {
        let rewrite = self.rewrite(graph, rng)?;
        graph.x = rewrite.x;
        graph.edge_index = rewrite.edge_index;
        graph.slow_node_mask = Some(rewrite.slow_node_mask);
        Ok(rewrite.summary)
    }

    /// Returns a rewritten deep copy of `graph`, leaving the input untouched.
    pub fn apply_to_copy<T: Scalar>(
        &self,
        graph: &Graph<T>,
        rng: &mut RngHandle,
    ) -> Result<Graph<T>, HalfHopError> {
        let rewrite = self.rewrite(graph, rng)?;
        Ok(Graph {
            x: rewrite.x,
            edge_index: rewrite.edge_index,
            slow_node_mask: Some(rewrite.slow_node_mask),
            attrs: graph.attrs.clone(),
        })
    }

    fn rewrite<T: Scalar>(
        &self,
        graph: &Graph<T>,
        rng: &mut RngHandle,
    ) -> Result<Rewrite<T>, HalfHopError> {
        graph.validate()?;
        let num_nodes = graph.num_nodes();
        let EdgeSelection {
            kept,
            self_loops,
            hopped,
        } = select_edges(&graph.edge_index, num_nodes, self.config.p, rng);

        let x = interpolate_slow_nodes(&graph.x, &hopped, self.config.alpha)?;

        let mut edge_index =
            EdgeIndex::with_capacity(kept.len() + self_loops.len() + 3 * hopped.len());
        for &(src, dst) in kept.iter().chain(self_loops.iter()) {
            edge_index.push(src, dst);
        }
        for (offset, &(src, _)) in hopped.iter().enumerate() {
            edge_index.push(src, num_nodes + offset);
        }
        for (offset, &(_, dst)) in hopped.iter().enumerate() {
            edge_index.push(num_nodes + offset, dst);
        }
        for (offset, &(_, dst)) in hopped.iter().enumerate() {
            edge_index.push(dst, num_nodes + offset);
        }

        let mut slow_node_mask = vec![false; num_nodes];
        slow_node_mask.resize(num_nodes + hopped.len(), true);

        let summary = HalfHopSummary {
            original_nodes: num_nodes,
            slow_nodes: hopped.len(),
            kept_edges: kept.len(),
            self_loops: self_loops.len(),
            output_edges: edge_index.len(),
        };
        tracing::debug!(
            alpha = self.config.alpha,
            p = self.config.p,
            original_nodes = summary.original_nodes,
            slow_nodes = summary.slow_nodes,
            kept_edges = summary.kept_edges,
            self_loops = summary.self_loops,
            output_edges = summary.output_edges,
            "half-hop rewrite"
        );

        Ok(Rewrite {
            x,
            edge_index,
            slow_node_mask,
            summary,
        })
    }
}

impl fmt::Display for HalfHop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HalfHop(alpha={:?}, p={:?})", self.config.alpha, self.config.p)
    }
}

struct Rewrite<T: Scalar> {
    x: FeatureMatrix<T>,
    edge_index: EdgeIndex,
    slow_node_mask: Vec<bool>,
    summary: HalfHopSummary,
}

/// Copies `x` and appends one interpolated row per hopped edge.
fn interpolate_slow_nodes<T: Scalar>(
    x: &FeatureMatrix<T>,
    hopped: &[(usize, usize)],
    alpha: f64,
) -> Result<FeatureMatrix<T>, HalfHopError> {
    let weight_src = T::from_f64(alpha);
    let weight_dst = T::from_f64(1.0 - alpha);
    let mut slow = Vec::with_capacity(hopped.len() * x.cols());
    for &(src, dst) in hopped {
        slow.extend(
            x.row(src)
                .iter()
                .zip(x.row(dst))
                .map(|(&s, &d)| s * weight_src + d * weight_dst),
        );
    }
    let mut out = x.clone();
    out.append_rows(hopped.len(), slow)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_exposes_parameters() {
        let transform = HalfHop::new(0.5, 1.0).unwrap();
        assert_eq!(transform.to_string(), "HalfHop(alpha=0.5, p=1.0)");
    }

    #[test]
    fn construction_fails_fast() {
        assert_eq!(
            HalfHop::new(0.5, 1.5).unwrap_err().info().code,
            "p-out-of-range"
        );
        assert_eq!(
            HalfHop::new(-0.1, 0.5).unwrap_err().info().code,
            "alpha-out-of-range"
        );
    }

    #[test]
    fn interpolation_uses_both_endpoints() {
        let x = FeatureMatrix::from_rows(&[vec![2.0f64, 4.0], vec![6.0, 8.0]]).unwrap();
        let out = interpolate_slow_nodes(&x, &[(0, 1), (1, 0)], 0.25).unwrap();
        assert_eq!(out.rows(), 4);
        assert_eq!(out.row(2), &[5.0, 7.0]);
        assert_eq!(out.row(3), &[3.0, 5.0]);
    }
}
