use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use halfhop_graph::{canonical_hash, Graph};
use serde::Serialize;

use crate::io::read_graph;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Graph file to describe.
    #[arg(long = "in")]
    pub input: PathBuf,
}

/// Counts printed by `halfhop inspect`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct GraphReport {
    pub nodes: usize,
    pub features: usize,
    pub edges: usize,
    pub self_loops: usize,
    pub slow_nodes: usize,
    pub attrs: Vec<String>,
    pub hash: String,
}

impl GraphReport {
    pub fn describe(graph: &Graph<f32>) -> Self {
        Self {
            nodes: graph.num_nodes(),
            features: graph.num_features(),
            edges: graph.num_edges(),
            self_loops: graph.edge_index.self_loop_count(),
            slow_nodes: graph.num_slow_nodes(),
            attrs: graph.attrs.keys().cloned().collect(),
            hash: canonical_hash(graph),
        }
    }
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let graph = read_graph(&args.input)?;
    let report = GraphReport::describe(&graph);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
