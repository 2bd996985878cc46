//! Provenance and schema descriptors shared across HalfHop artifacts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Returns whether a payload written with `other` can be read by `self`.
    pub fn reads(&self, other: &SchemaVersion) -> bool {
        self.major == other.major && self.minor >= other.minor
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// One augmented output recorded in a [`RunProvenance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Substream index used to derive the copy's seed.
    pub substream: u64,
    /// Seed actually fed to the RNG for this copy.
    pub seed: u64,
    /// Canonical hash of the augmented graph.
    pub graph_hash: String,
    /// Number of slow nodes inserted.
    pub slow_nodes: usize,
    /// File name of the artifact, relative to the manifest.
    pub file: String,
}

/// Provenance information attached to every augmentation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Schema version of the manifest itself.
    pub schema_version: SchemaVersion,
    /// Canonical hash of the input graph.
    pub input_hash: String,
    /// Master deterministic seed used for all randomness.
    pub seed: u64,
    /// Interpolation weight used by the transform.
    pub alpha: f64,
    /// Half-hop probability used by the transform.
    pub p: f64,
    /// One entry per augmented copy, in substream order.
    pub outputs: Vec<OutputRecord>,
    /// Version map for all tools involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}
