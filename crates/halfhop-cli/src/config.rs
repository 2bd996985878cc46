use std::fs;
use std::path::Path;

use halfhop_core::errors::{ErrorInfo, HalfHopError};
use halfhop_transform::HalfHopConfig;
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters of an augmentation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentConfig {
    /// Transform parameters.
    #[serde(default)]
    pub halfhop: HalfHopConfig,
    /// Master seed; copy `k` uses substream `k`.
    #[serde(default)]
    pub seed: u64,
    /// Number of independently augmented copies to write.
    #[serde(default = "default_copies")]
    pub copies: usize,
}

fn default_copies() -> usize {
    1
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            halfhop: HalfHopConfig::default(),
            seed: 0,
            copies: default_copies(),
        }
    }
}

impl AugmentConfig {
    /// Reads a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, HalfHopError> {
        let text = fs::read_to_string(path)
            .map_err(|err| HalfHopError::io(path.display().to_string(), &err))?;
        Self::from_yaml(&text)
    }

    /// Parses a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self, HalfHopError> {
        serde_yaml::from_str(text)
            .map_err(|err| HalfHopError::Serde(ErrorInfo::new("deserialize-yaml", err.to_string())))
    }

    /// Checks the run-level settings and the transform parameters.
    pub fn validate(&self) -> Result<(), HalfHopError> {
        if self.copies == 0 {
            return Err(HalfHopError::Configuration(
                ErrorInfo::new("copies-zero", "at least one augmented copy is required")
                    .with_hint("set `copies` to 1 or more"),
            ));
        }
        self.halfhop.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = AugmentConfig::from_yaml("{}").unwrap();
        assert_eq!(config, AugmentConfig::default());
    }

    #[test]
    fn nested_transform_parameters_are_read() {
        let config = AugmentConfig::from_yaml(
            "halfhop:\n  alpha: 0.25\n  p: 0.75\nseed: 9\ncopies: 3\n",
        )
        .unwrap();
        assert_eq!(config.halfhop.alpha, 0.25);
        assert_eq!(config.halfhop.p, 0.75);
        assert_eq!(config.seed, 9);
        assert_eq!(config.copies, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_copies_are_rejected() {
        let config = AugmentConfig {
            copies: 0,
            ..AugmentConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().info().code, "copies-zero");
    }

    #[test]
    fn bad_yaml_is_a_serde_error() {
        let err = AugmentConfig::from_yaml("halfhop: [").unwrap_err();
        assert_eq!(err.info().code, "deserialize-yaml");
    }
}
