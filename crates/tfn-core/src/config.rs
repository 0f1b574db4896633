//! Editor configuration.

use serde::{Deserialize, Serialize};

/// Default number of samples in the committed table.
pub const DEFAULT_RESOLUTION: usize = 256;
/// Presets with fewer color points than this are editable templates.
pub const DEFAULT_EDITABLE_THRESHOLD: usize = 10;

/// Runtime configuration for a [`TransferFunctionEditor`](crate::editor::TransferFunctionEditor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Samples per committed table. Values below 2 fall back to the default.
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    /// Color-point count below which a preset is editable.
    #[serde(default = "default_editable_threshold")]
    pub editable_threshold: usize,
}

impl EditorConfig {
    /// Resolution actually used for sampling.
    pub fn effective_resolution(&self) -> usize {
        if self.resolution < 2 {
            DEFAULT_RESOLUTION
        } else {
            self.resolution
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            resolution: std::env::var("TFN_RESOLUTION")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .filter(|&n: &usize| n >= 2)
                .unwrap_or(DEFAULT_RESOLUTION),
            editable_threshold: DEFAULT_EDITABLE_THRESHOLD,
        }
    }
}

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

fn default_editable_threshold() -> usize {
    DEFAULT_EDITABLE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolution_is_usable() {
        let config = EditorConfig::default();
        assert!(config.resolution >= 2);
        assert_eq!(config.editable_threshold, DEFAULT_EDITABLE_THRESHOLD);
    }

    #[test]
    fn test_effective_resolution_guards_small_values() {
        let config = EditorConfig {
            resolution: 1,
            editable_threshold: 4,
        };
        assert_eq!(config.effective_resolution(), DEFAULT_RESOLUTION);
        let config = EditorConfig {
            resolution: 16,
            editable_threshold: 4,
        };
        assert_eq!(config.effective_resolution(), 16);
    }
}
