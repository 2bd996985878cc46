use std::collections::BTreeMap;

use halfhop_core::errors::{ErrorInfo, HalfHopError};
use halfhop_core::provenance::SchemaVersion;
use serde::{Deserialize, Serialize};

use crate::edge_index::EdgeIndex;
use crate::features::{FeatureMatrix, Scalar};
use crate::graph::{AttrValue, Graph};

/// Schema version written into every graph envelope.
pub const GRAPH_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes<T: Scalar>(graph: &Graph<T>) -> Result<Vec<u8>, HalfHopError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| HalfHopError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes<T: Scalar>(bytes: &[u8]) -> Result<Graph<T>, HalfHopError> {
    let serializable: SerializableGraph<T> = bincode::deserialize(bytes)
        .map_err(|err| HalfHopError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
///
/// JSON has no encoding for NaN or the infinities, so graphs holding them are
/// rejected with `non-finite-json`. Write them with [`graph_to_bytes`] instead.
pub fn graph_to_json<T: Scalar>(graph: &Graph<T>) -> Result<String, HalfHopError> {
    check_finite(graph)?;
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| HalfHopError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string.
pub fn graph_from_json<T: Scalar>(json: &str) -> Result<Graph<T>, HalfHopError> {
    let serializable: SerializableGraph<T> = serde_json::from_str(json)
        .map_err(|err| HalfHopError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph<T> {
    schema_version: SchemaVersion,
    dtype: String,
    num_nodes: usize,
    num_features: usize,
    x: Vec<T>,
    edge_index: Vec<Vec<i64>>,
    #[serde(default)]
    slow_node_mask: Option<Vec<bool>>,
    #[serde(default)]
    attrs: BTreeMap<String, AttrValue>,
}

impl<T: Scalar> SerializableGraph<T> {
    fn from_graph(graph: &Graph<T>) -> Self {
        Self {
            schema_version: GRAPH_SCHEMA,
            dtype: T::DTYPE.to_string(),
            num_nodes: graph.num_nodes(),
            num_features: graph.num_features(),
            x: graph.x.as_slice().to_vec(),
            edge_index: graph.edge_index.to_rows(),
            slow_node_mask: graph.slow_node_mask.clone(),
            attrs: graph.attrs.clone(),
        }
    }

    fn into_graph(self) -> Result<Graph<T>, HalfHopError> {
        if !GRAPH_SCHEMA.reads(&self.schema_version) {
            return Err(HalfHopError::Serde(
                ErrorInfo::new("schema-version", "unsupported graph schema version")
                    .with_context("found", format_version(&self.schema_version))
                    .with_context("supported", format_version(&GRAPH_SCHEMA)),
            ));
        }
        if self.dtype != T::DTYPE {
            return Err(HalfHopError::Serde(
                ErrorInfo::new("dtype-mismatch", "stored feature precision differs")
                    .with_context("found", self.dtype)
                    .with_context("expected", T::DTYPE),
            ));
        }
        let x = FeatureMatrix::new(self.num_nodes, self.num_features, self.x)?;
        let edge_index = EdgeIndex::from_rows(&self.edge_index)?;
        let graph = Graph {
            x,
            edge_index,
            slow_node_mask: self.slow_node_mask,
            attrs: self.attrs,
        };
        graph.validate()?;
        Ok(graph)
    }
}

fn check_finite<T: Scalar>(graph: &Graph<T>) -> Result<(), HalfHopError> {
    let cols = graph.num_features().max(1);
    if let Some(idx) = graph.x.as_slice().iter().position(|value| !value.is_finite()) {
        return Err(HalfHopError::Serde(
            non_finite("x")
                .with_context("row", (idx / cols).to_string())
                .with_context("col", (idx % cols).to_string()),
        ));
    }
    for (key, value) in &graph.attrs {
        let finite = match value {
            AttrValue::Float(value) => value.is_finite(),
            AttrValue::Floats(values) => values.iter().all(|value| value.is_finite()),
            _ => true,
        };
        if !finite {
            return Err(HalfHopError::Serde(
                non_finite("attrs").with_context("attr", key.as_str()),
            ));
        }
    }
    Ok(())
}

fn non_finite(field: &str) -> ErrorInfo {
    ErrorInfo::new("non-finite-json", "JSON cannot represent NaN or infinite values")
        .with_context("field", field)
        .with_hint("write the graph as bincode (.bin) instead")
}

fn format_version(version: &SchemaVersion) -> String {
    format!("{}.{}.{}", version.major, version.minor, version.patch)
}
