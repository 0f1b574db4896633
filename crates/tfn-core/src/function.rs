//! The transfer function record and its value range.

use serde::{Deserialize, Serialize};

use crate::error::TfnError;
use crate::points::{ColorPoint, ControlPoint, ControlPoints, OpacityPoint};
use crate::sampling::table::{self, SampledTable};

/// Affine mapping from normalized curve position to physical data units.
///
/// Always ordered: `low <= high`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub low: f32,
    pub high: f32,
}

impl ValueRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    ///
    /// A NaN bound takes the value of the other bound; two NaNs give an
    /// empty range at 0.
    pub fn new(a: f32, b: f32) -> Self {
        let (a, b) = match (a.is_nan(), b.is_nan()) {
            (true, true) => (0.0, 0.0),
            (true, false) => (b, b),
            (false, true) => (a, a),
            (false, false) => (a, b),
        };
        if b < a {
            Self { low: b, high: a }
        } else {
            Self { low: a, high: b }
        }
    }

    pub fn span(&self) -> f32 {
        self.high - self.low
    }

    /// `true` when the range has no extent.
    pub fn is_empty(&self) -> bool {
        self.high <= self.low
    }

    /// Map a normalized position to data units.
    pub fn to_physical(&self, t: f32) -> f32 {
        self.low + self.span() * t
    }

    /// Sub-range given as percentages of this range.
    ///
    /// Percentages are clamped to `[0, 100]` and ordered.
    pub fn sub_range_percent(&self, low_pct: f32, high_pct: f32) -> Self {
        let lo = low_pct.clamp(0.0, 100.0) * 0.01;
        let hi = high_pct.clamp(0.0, 100.0) * 0.01;
        Self::new(self.to_physical(lo), self.to_physical(hi))
    }
}

/// A transfer function as handed over by a file loader.
///
/// Color point positions are ignored: loaded colors are re-spaced evenly
/// over `[0, 1]` by index. Opacity positions are used as supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedFunction {
    pub name: String,
    pub colors: Vec<ColorPoint>,
    pub opacity: Vec<OpacityPoint>,
}

/// A named pair of color and opacity curves.
///
/// Each function owns its point sequences exclusively. `editable` is a
/// policy flag for the editor's add-point gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferFunction {
    name: String,
    colors: ControlPoints<ColorPoint>,
    opacity: ControlPoints<OpacityPoint>,
    editable: bool,
}

impl TransferFunction {
    /// Build from explicit point lists. Fails if either list has fewer
    /// than 2 points.
    pub fn new(
        name: impl Into<String>,
        colors: Vec<ColorPoint>,
        opacity: Vec<OpacityPoint>,
        editable: bool,
    ) -> Result<Self, TfnError> {
        Ok(Self {
            name: name.into(),
            colors: ControlPoints::new(colors)?,
            opacity: ControlPoints::new(opacity)?,
            editable,
        })
    }

    /// Build from flattened coordinate lists.
    ///
    /// `color_flat` holds 4 floats per point (`position, r, g, b`) and
    /// `opacity_flat` 2 per point (`position, alpha`). A trailing partial
    /// group is ignored.
    pub fn from_flat(
        name: impl Into<String>,
        color_flat: &[f32],
        opacity_flat: &[f32],
        editable: bool,
    ) -> Result<Self, TfnError> {
        let colors = color_flat
            .chunks_exact(4)
            .map(|c| ColorPoint::new(c[0], [c[1], c[2], c[3]]))
            .collect();
        let opacity = opacity_flat
            .chunks_exact(2)
            .map(|o| OpacityPoint::new(o[0], o[1]))
            .collect();
        Self::new(name, colors, opacity, editable)
    }

    /// Build from loader output. Loaded functions are never editable.
    ///
    /// Point counts are checked before anything is built, colors first.
    pub fn from_loaded(loaded: LoadedFunction) -> Result<Self, TfnError> {
        let LoadedFunction {
            name,
            colors,
            opacity,
        } = loaded;

        if colors.len() < 2 {
            return Err(ColorPoint::too_few(colors.len()));
        }
        if opacity.len() < 2 {
            return Err(OpacityPoint::too_few(opacity.len()));
        }

        let step = 1.0 / (colors.len() - 1) as f32;
        let colors = colors
            .iter()
            .enumerate()
            .map(|(i, c)| ColorPoint::new(i as f32 * step, c.rgb()))
            .collect();

        Self::new(name, colors, opacity, false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn colors(&self) -> &ControlPoints<ColorPoint> {
        &self.colors
    }

    pub fn opacity(&self) -> &ControlPoints<OpacityPoint> {
        &self.opacity
    }

    pub(crate) fn colors_mut(&mut self) -> &mut ControlPoints<ColorPoint> {
        &mut self.colors
    }

    pub(crate) fn opacity_mut(&mut self) -> &mut ControlPoints<OpacityPoint> {
        &mut self.opacity
    }

    /// Color of the curve at `position`, clamped outside `[0, 1]`.
    pub fn color_at(&self, position: f32) -> [f32; 3] {
        self.colors.evaluate(position)
    }

    /// Opacity of the curve at `position`, clamped outside `[0, 1]`.
    pub fn opacity_at(&self, position: f32) -> f32 {
        self.opacity.evaluate(position)
    }

    /// Sample both curves into a dense table.
    pub fn sample(&self, resolution: usize) -> Result<SampledTable, TfnError> {
        table::sample(&self.colors, &self.opacity, resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_value_range_orders_bounds() {
        let r = ValueRange::new(5.0, -1.0);
        assert_eq!(r, ValueRange { low: -1.0, high: 5.0 });
        assert_eq!(r.span(), 6.0);
        assert!(!r.is_empty());
        assert!(ValueRange::default().is_empty());

        let r = ValueRange::new(f32::NAN, 1.0);
        assert_eq!(r, ValueRange { low: 1.0, high: 1.0 });
        let r = ValueRange::new(-2.0, f32::NAN);
        assert_eq!(r, ValueRange { low: -2.0, high: -2.0 });
        let r = ValueRange::new(f32::NAN, f32::NAN);
        assert_eq!(r, ValueRange { low: 0.0, high: 0.0 });
        assert!(r.low <= r.high);
    }

    #[test]
    fn test_value_range_percent() {
        let r = ValueRange::new(10.0, 20.0);
        let sub = r.sub_range_percent(25.0, 150.0);
        assert!((sub.low - 12.5).abs() < EPSILON);
        assert!((sub.high - 20.0).abs() < EPSILON);

        let swapped = r.sub_range_percent(80.0, 20.0);
        assert!((swapped.low - 12.0).abs() < EPSILON);
        assert!((swapped.high - 18.0).abs() < EPSILON);
    }

    #[test]
    fn test_from_flat_parses_groups() {
        let tfn = TransferFunction::from_flat(
            "flat",
            &[0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.5],
            &[0.0, 0.0, 1.0, 1.0],
            true,
        )
        .unwrap();
        assert_eq!(tfn.colors().len(), 2);
        assert_eq!(tfn.opacity().len(), 2);
        assert!(tfn.is_editable());
        assert_eq!(tfn.color_at(1.0), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_from_flat_too_few_opacity() {
        let err = TransferFunction::from_flat(
            "bad",
            &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
            &[0.0, 0.0],
            false,
        )
        .unwrap_err();
        assert!(matches!(err, TfnError::TooFewOpacityPoints { count: 1 }));
    }

    #[test]
    fn test_from_loaded_respaces_colors() {
        let loaded = LoadedFunction {
            name: "loaded".into(),
            colors: vec![
                ColorPoint::new(0.9, [0.0, 0.0, 0.0]),
                ColorPoint::new(0.1, [0.5, 0.5, 0.5]),
                ColorPoint::new(0.2, [1.0, 1.0, 1.0]),
            ],
            opacity: vec![OpacityPoint::new(0.0, 0.2), OpacityPoint::new(1.0, 0.6)],
        };
        let tfn = TransferFunction::from_loaded(loaded).unwrap();
        let positions: Vec<f32> = tfn.colors().iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);
        assert_eq!(tfn.color_at(0.5), [0.5, 0.5, 0.5]);
        assert!(!tfn.is_editable());
    }

    #[test]
    fn test_from_loaded_checks_colors_first() {
        let loaded = LoadedFunction {
            name: "empty".into(),
            colors: vec![ColorPoint::new(0.0, [1.0; 3])],
            opacity: vec![],
        };
        let err = TransferFunction::from_loaded(loaded).unwrap_err();
        assert!(matches!(err, TfnError::TooFewColorPoints { count: 1 }));
    }

    #[test]
    fn test_point_evaluation() {
        let tfn = TransferFunction::from_flat(
            "eval",
            &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
            &[0.0, 1.0, 0.5, 0.0, 1.0, 1.0],
            true,
        )
        .unwrap();
        assert!((tfn.opacity_at(0.25) - 0.5).abs() < EPSILON);
        assert_eq!(tfn.opacity_at(0.5), 0.0);
        assert!((tfn.color_at(0.25)[1] - 0.25).abs() < EPSILON);
    }
}
