use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use halfhop_core::provenance::{OutputRecord, RunProvenance, SchemaVersion};
use halfhop_core::rng::{derive_substream_seed, RngHandle};
use halfhop_graph::{canonical_hash, Graph};
use halfhop_transform::HalfHop;
use tracing::{debug, info};

use crate::config::AugmentConfig;
use crate::io::{read_graph, write_graph};

/// Schema version of `manifest.json`.
const MANIFEST_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Input graph (`.bin` for bincode, JSON otherwise).
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Output directory for augmented graphs and the manifest.
    #[arg(long)]
    pub out: PathBuf,
    /// YAML run configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the interpolation weight.
    #[arg(long)]
    pub alpha: Option<f64>,
    /// Override the half-hop probability.
    #[arg(long)]
    pub p: Option<f64>,
    /// Override the master seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Override the number of augmented copies.
    #[arg(long)]
    pub copies: Option<usize>,
    /// Write bincode (`graph_<k>.bin`) instead of JSON.
    #[arg(long)]
    pub binary: bool,
}

impl ApplyArgs {
    fn resolve_config(&self) -> Result<AugmentConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => AugmentConfig::load(path)?,
            None => AugmentConfig::default(),
        };
        if let Some(alpha) = self.alpha {
            config.halfhop.alpha = alpha;
        }
        if let Some(p) = self.p {
            config.halfhop.p = p;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(copies) = self.copies {
            config.copies = copies;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Writes one augmented graph per copy plus `manifest.json`.
///
/// Every copy starts from the same input. With `inplace` set, the last copy
/// is augmented in the loaded input buffer itself and earlier copies are
/// cloned; otherwise every copy is cloned. Both paths write identical graphs.
pub fn run(args: &ApplyArgs) -> Result<RunProvenance, Box<dyn Error>> {
    let config = args.resolve_config()?;
    let transform = HalfHop::from_config(config.halfhop)?;
    let mut input = read_graph(&args.input)?;
    let input_hash = canonical_hash(&input);
    fs::create_dir_all(&args.out)?;

    info!(
        %transform,
        input = %args.input.display(),
        nodes = input.num_nodes(),
        edges = input.num_edges(),
        copies = config.copies,
        "applying half-hop"
    );

    let mut outputs = Vec::with_capacity(config.copies);
    for copy in 0..config.copies as u64 {
        let seed = derive_substream_seed(config.seed, copy);
        let mut rng = RngHandle::from_seed(seed);
        let copied: Graph<f32>;
        let augmented = if transform.inplace() && copy + 1 == config.copies as u64 {
            debug!(copy, "augmenting the input buffer in place");
            transform.apply_in_place(&mut input, &mut rng)?;
            &input
        } else {
            copied = transform.apply_to_copy(&input, &mut rng)?;
            &copied
        };
        let extension = if args.binary { "bin" } else { "json" };
        let file = format!("graph_{copy}.{extension}");
        write_graph(&args.out.join(&file), augmented)?;
        let record = OutputRecord {
            substream: copy,
            seed,
            graph_hash: canonical_hash(augmented),
            slow_nodes: augmented.num_slow_nodes(),
            file,
        };
        info!(
            copy,
            slow_nodes = record.slow_nodes,
            edges = augmented.num_edges(),
            "wrote augmented copy"
        );
        outputs.push(record);
    }

    let mut tool_versions = BTreeMap::new();
    tool_versions.insert(
        "halfhop-cli".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    let provenance = RunProvenance {
        schema_version: MANIFEST_SCHEMA,
        input_hash,
        seed: config.seed,
        alpha: transform.alpha(),
        p: transform.p(),
        outputs,
        tool_versions,
    };
    fs::write(
        args.out.join("manifest.json"),
        serde_json::to_string_pretty(&provenance)?,
    )?;
    Ok(provenance)
}
