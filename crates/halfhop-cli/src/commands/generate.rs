use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use halfhop_core::rng::RngHandle;
use halfhop_graph::{canonical_hash, gen_random_graph};
use tracing::info;

use crate::io::write_graph;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of nodes.
    #[arg(long, default_value_t = 32)]
    pub nodes: usize,
    /// Number of directed edges.
    #[arg(long, default_value_t = 96)]
    pub edges: usize,
    /// Feature width.
    #[arg(long, default_value_t = 8)]
    pub features: usize,
    /// Fraction of edges generated as self-loops.
    #[arg(long = "self-loops", default_value_t = 0.1)]
    pub self_loops: f64,
    /// Deterministic seed.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Output path (`.bin` for bincode, JSON otherwise).
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let mut rng = RngHandle::from_seed(args.seed);
    let graph = gen_random_graph::<f32>(
        args.nodes,
        args.edges,
        args.features,
        args.self_loops,
        &mut rng,
    )?;
    write_graph(&args.out, &graph)?;
    info!(
        path = %args.out.display(),
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        hash = %canonical_hash(&graph),
        "generated graph"
    );
    Ok(())
}
