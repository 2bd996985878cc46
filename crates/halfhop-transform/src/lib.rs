#![deny(missing_docs)]

//! Half-hop graph augmentation.
//!
//! Slow nodes are inserted along selected edges so that message passing over
//! the rewritten graph needs an extra hop to cross them. Use
//! `Graph::slow_node_mask` to drop the synthetic nodes after message passing.

mod config;
mod halfhop;
mod selection;

pub use config::HalfHopConfig;
pub use halfhop::{Augmented, HalfHop, HalfHopSummary};
pub use selection::{sample_active_nodes, select_edges, EdgeSelection};
