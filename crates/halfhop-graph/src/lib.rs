#![deny(missing_docs)]

//! Node-feature graphs with a `[2, E]` edge index, plus validation,
//! canonical hashing, persistence and random generators.

mod edge_index;
mod features;
mod generators;
mod graph;
mod hash;
mod serialization;

pub use edge_index::EdgeIndex;
pub use features::{FeatureMatrix, Scalar};
pub use generators::gen_random_graph;
pub use graph::{AttrValue, Graph};
pub use hash::canonical_hash;
pub use serialization::{
    graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json, GRAPH_SCHEMA,
};
