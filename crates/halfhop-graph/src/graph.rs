use std::collections::BTreeMap;

use halfhop_core::errors::{ErrorInfo, HalfHopError};
use serde::{Deserialize, Serialize};

use crate::edge_index::EdgeIndex;
use crate::features::{FeatureMatrix, Scalar};

/// Graph-level attribute carried through transforms untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point scalar.
    Float(f64),
    /// Free-form text.
    Text(String),
    /// Integer vector (labels, split ids).
    Ints(Vec<i64>),
    /// Floating point vector.
    Floats(Vec<f64>),
}

/// Node-feature graph with a directed edge index.
///
/// The node count is the number of feature rows. `slow_node_mask` is absent on
/// raw inputs and set once a half-hop transform has run.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<T: Scalar = f32> {
    /// Node features, one row per node.
    pub x: FeatureMatrix<T>,
    /// Directed edges as `(source, target)` columns.
    pub edge_index: EdgeIndex,
    /// `true` for synthetic nodes, `false` for original ones.
    pub slow_node_mask: Option<Vec<bool>>,
    /// Pass-through attributes.
    pub attrs: BTreeMap<String, AttrValue>,
}

impl<T: Scalar> Graph<T> {
    /// Builds a validated graph from features and edges.
    pub fn new(x: FeatureMatrix<T>, edge_index: EdgeIndex) -> Result<Self, HalfHopError> {
        let graph = Self {
            x,
            edge_index,
            slow_node_mask: None,
            attrs: BTreeMap::new(),
        };
        graph.validate()?;
        Ok(graph)
    }

    /// Attaches a pass-through attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: AttrValue) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }

    /// Looks up a pass-through attribute.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Number of nodes, original and synthetic.
    pub fn num_nodes(&self) -> usize {
        self.x.rows()
    }

    /// Number of directed edges.
    pub fn num_edges(&self) -> usize {
        self.edge_index.len()
    }

    /// Feature width.
    pub fn num_features(&self) -> usize {
        self.x.cols()
    }

    /// Number of nodes flagged synthetic by the mask.
    pub fn num_slow_nodes(&self) -> usize {
        self.slow_node_mask
            .as_ref()
            .map_or(0, |mask| mask.iter().filter(|slow| **slow).count())
    }

    /// Ids of nodes that are not synthetic, in ascending order.
    ///
    /// Downstream consumers use this to drop slow nodes after message passing.
    pub fn original_node_ids(&self) -> Vec<usize> {
        match &self.slow_node_mask {
            Some(mask) => mask
                .iter()
                .enumerate()
                .filter(|(_, slow)| !**slow)
                .map(|(idx, _)| idx)
                .collect(),
            None => (0..self.num_nodes()).collect(),
        }
    }

    /// Checks edge bounds and mask length against the node count.
    pub fn validate(&self) -> Result<(), HalfHopError> {
        self.edge_index.check_bounds(self.num_nodes())?;
        if let Some(mask) = &self.slow_node_mask {
            if mask.len() != self.num_nodes() {
                return Err(HalfHopError::Validation(
                    ErrorInfo::new("mask-length", "slow node mask does not cover every node")
                        .with_context("mask", mask.len().to_string())
                        .with_context("num_nodes", self.num_nodes().to_string()),
                ));
            }
        }
        Ok(())
    }
}
