//! Built-in color palettes used to seed new transfer functions.
//!
//! Each preset is a flattened color table, 4 floats per point
//! (`position, r, g, b`). Presets are copied into fresh
//! [`TransferFunction`]s; the tables themselves are never mutated.

use crate::error::TfnError;
use crate::function::TransferFunction;

/// Opacity ramp given to every preset-seeded function, `(position, alpha)`.
pub const DEFAULT_OPACITY: [[f32; 2]; 5] = [
    [0.00, 0.00],
    [0.25, 0.25],
    [0.50, 0.50],
    [0.75, 0.75],
    [1.00, 1.00],
];

/// A named, immutable palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    /// Flattened color points, 4 floats each.
    pub colors: &'static [f32],
}

impl Preset {
    /// Number of color points in the palette.
    pub const fn point_count(&self) -> usize {
        self.colors.len() / 4
    }

    /// Sparse palettes are starting templates and may be edited; dense,
    /// sampled palettes are not.
    pub const fn is_editable(&self, editable_threshold: usize) -> bool {
        self.point_count() < editable_threshold
    }

    /// Copy the palette into a new transfer function with the default
    /// opacity ramp.
    pub fn instantiate(&self, editable_threshold: usize) -> Result<TransferFunction, TfnError> {
        TransferFunction::from_flat(
            self.name,
            self.colors,
            DEFAULT_OPACITY.as_flattened(),
            self.is_editable(editable_threshold),
        )
    }
}

/// The built-in palettes, in menu order.
pub fn builtins() -> &'static [Preset] {
    &BUILTINS
}

static BUILTINS: [Preset; 6] = [
    Preset {
        name: "Jet",
        colors: &JET,
    },
    Preset {
        name: "Cool to Warm",
        colors: &COOL_TO_WARM,
    },
    Preset {
        name: "Black-Body Radiation",
        colors: &BLACK_BODY,
    },
    Preset {
        name: "Grayscale",
        colors: &GRAYSCALE,
    },
    Preset {
        name: "Rainbow",
        colors: &RAINBOW,
    },
    Preset {
        name: "Viridis",
        colors: &VIRIDIS,
    },
];

#[rustfmt::skip]
const JET: [f32; 24] = [
    0.000, 0.0, 0.0, 0.5,
    0.125, 0.0, 0.0, 1.0,
    0.375, 0.0, 1.0, 1.0,
    0.625, 1.0, 1.0, 0.0,
    0.875, 1.0, 0.0, 0.0,
    1.000, 0.5, 0.0, 0.0,
];

#[rustfmt::skip]
const COOL_TO_WARM: [f32; 12] = [
    0.0, 0.231373, 0.298039, 0.752941,
    0.5, 0.865003, 0.865003, 0.865003,
    1.0, 0.705882, 0.015686, 0.149020,
];

#[rustfmt::skip]
const BLACK_BODY: [f32; 16] = [
    0.00, 0.000000, 0.000000, 0.000000,
    0.39, 0.901961, 0.000000, 0.000000,
    0.58, 0.901961, 0.901961, 0.000000,
    1.00, 1.000000, 1.000000, 1.000000,
];

#[rustfmt::skip]
const GRAYSCALE: [f32; 8] = [
    0.0, 0.0, 0.0, 0.0,
    1.0, 1.0, 1.0, 1.0,
];

#[rustfmt::skip]
const RAINBOW: [f32; 20] = [
    0.00, 0.0, 0.0, 1.0,
    0.25, 0.0, 1.0, 1.0,
    0.50, 0.0, 1.0, 0.0,
    0.75, 1.0, 1.0, 0.0,
    1.00, 1.0, 0.0, 0.0,
];

// Sampled every 0.1 from the matplotlib colormap.
#[rustfmt::skip]
const VIRIDIS: [f32; 44] = [
    0.0, 0.267004, 0.004874, 0.329415,
    0.1, 0.282623, 0.140926, 0.457517,
    0.2, 0.253935, 0.265254, 0.529983,
    0.3, 0.206756, 0.371758, 0.553117,
    0.4, 0.163625, 0.471133, 0.558148,
    0.5, 0.127568, 0.566949, 0.550556,
    0.6, 0.134692, 0.658636, 0.517649,
    0.7, 0.266941, 0.748751, 0.440573,
    0.8, 0.477504, 0.821444, 0.318195,
    0.9, 0.741388, 0.873449, 0.149561,
    1.0, 0.993248, 0.906157, 0.143936,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EDITABLE_THRESHOLD;

    #[test]
    fn test_every_builtin_instantiates() {
        for preset in builtins() {
            let tfn = preset.instantiate(DEFAULT_EDITABLE_THRESHOLD).unwrap();
            assert_eq!(tfn.name(), preset.name);
            assert_eq!(tfn.colors().len(), preset.point_count());
            assert_eq!(tfn.opacity().len(), 5);
        }
    }

    #[test]
    fn test_builtin_tables_are_well_formed() {
        for preset in builtins() {
            assert_eq!(preset.colors.len() % 4, 0, "{}", preset.name);
            let positions: Vec<f32> = preset.colors.iter().step_by(4).copied().collect();
            assert_eq!(positions.first(), Some(&0.0), "{}", preset.name);
            assert_eq!(positions.last(), Some(&1.0), "{}", preset.name);
            assert!(positions.windows(2).all(|w| w[0] <= w[1]), "{}", preset.name);
        }
    }

    #[test]
    fn test_builtin_names_are_unique() {
        let names: Vec<&str> = builtins().iter().map(|p| p.name).collect();
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name), "duplicate preset {name}");
        }
    }

    #[test]
    fn test_editability_follows_density() {
        let find = |name: &str| builtins().iter().find(|p| p.name == name).copied().unwrap();
        assert!(find("Cool to Warm").is_editable(DEFAULT_EDITABLE_THRESHOLD));
        assert!(!find("Viridis").is_editable(DEFAULT_EDITABLE_THRESHOLD));
        assert!(find("Viridis").is_editable(usize::MAX));
    }

    #[test]
    fn test_default_opacity_ramp() {
        let tfn = builtins()[0].instantiate(DEFAULT_EDITABLE_THRESHOLD).unwrap();
        let pairs: Vec<[f32; 2]> = tfn.opacity().iter().map(|o| [o.position, o.alpha]).collect();
        assert_eq!(pairs, DEFAULT_OPACITY.to_vec());
    }
}
