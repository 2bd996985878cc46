#![deny(missing_docs)]
#![doc = "Shared error taxonomy, deterministic randomness and provenance types for the HalfHop graph augmentation."]

pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, HalfHopError};
pub use provenance::{OutputRecord, RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
