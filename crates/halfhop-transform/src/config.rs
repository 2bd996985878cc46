use halfhop_core::errors::{ErrorInfo, HalfHopError};
use serde::{Deserialize, Serialize};

/// Serializable parameters of a [`HalfHop`](crate::HalfHop) transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfHopConfig {
    /// Interpolation weight of the source endpoint in slow node features.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Probability that a node is active; edges into active nodes are half-hopped.
    #[serde(default = "default_p")]
    pub p: f64,
    /// Mutate the caller's graph instead of working on a copy.
    #[serde(default = "default_inplace")]
    pub inplace: bool,
}

fn default_alpha() -> f64 {
    0.5
}

fn default_p() -> f64 {
    1.0
}

fn default_inplace() -> bool {
    true
}

impl Default for HalfHopConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            p: default_p(),
            inplace: default_inplace(),
        }
    }
}

impl HalfHopConfig {
    /// Checks that `alpha` and `p` lie in `[0, 1]`. NaN is rejected.
    pub fn validate(&self) -> Result<(), HalfHopError> {
        check_unit_interval("alpha", self.alpha)?;
        check_unit_interval("p", self.p)
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<(), HalfHopError> {
    if (0.0..=1.0).contains(&value) {
        return Ok(());
    }
    Err(HalfHopError::Configuration(
        ErrorInfo::new(
            format!("{name}-out-of-range"),
            format!("{name} must be in [0, 1], got {value}"),
        )
        .with_context(name, value.to_string()),
    ))
}
