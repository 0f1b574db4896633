//! Control points for the color and opacity curves.
//!
//! A transfer function is two independent piecewise-linear curves over the
//! normalized domain `[0, 1]`: one for RGB, one for opacity. Each curve is an
//! ordered [`ControlPoints`] sequence; the point types below are its anchors.

mod store;

pub use store::ControlPoints;

use serde::{Deserialize, Serialize};

use crate::error::TfnError;
use crate::sampling::lerp::lerp;

/// An anchor of a piecewise-linear curve.
///
/// Implementors clamp their channel values to `[0, 1]` on construction and
/// on every value update, so a stored point is always in range.
pub trait ControlPoint: Copy {
    /// The value carried by the point (RGB triple or alpha).
    type Value: Copy;

    /// Build a point with position and value clamped to `[0, 1]`.
    fn new(position: f32, value: Self::Value) -> Self;

    /// Normalized position of the point.
    fn position(&self) -> f32;

    /// Set the position, clamped to `[0, 1]`.
    fn set_position(&mut self, position: f32);

    /// Current value of the point.
    fn value(&self) -> Self::Value;

    /// Replace the value, clamping each channel to `[0, 1]`.
    fn set_value(&mut self, value: Self::Value);

    /// Interpolate the value between `left` and `right` at `position`.
    ///
    /// Channels are interpolated independently.
    fn interpolate(left: &Self, right: &Self, position: f32) -> Self::Value;

    /// Error reported when a sequence of this kind has fewer than 2 points.
    fn too_few(count: usize) -> TfnError;
}

/// One anchor of the color curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPoint {
    /// Normalized position in `[0, 1]`. Loaders may omit it.
    #[serde(default)]
    pub position: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorPoint {
    /// Color as an `[r, g, b]` triple.
    pub const fn rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl ControlPoint for ColorPoint {
    type Value = [f32; 3];

    fn new(position: f32, value: [f32; 3]) -> Self {
        let [r, g, b] = clamp_rgb(value);
        Self {
            position: clamp_unit(position),
            r,
            g,
            b,
        }
    }

    fn position(&self) -> f32 {
        self.position
    }

    fn set_position(&mut self, position: f32) {
        self.position = clamp_unit(position);
    }

    fn value(&self) -> [f32; 3] {
        self.rgb()
    }

    fn set_value(&mut self, value: [f32; 3]) {
        [self.r, self.g, self.b] = clamp_rgb(value);
    }

    fn interpolate(left: &Self, right: &Self, position: f32) -> [f32; 3] {
        let (p0, p1) = (left.position, right.position);
        [
            lerp(left.r, right.r, p0, p1, position),
            lerp(left.g, right.g, p0, p1, position),
            lerp(left.b, right.b, p0, p1, position),
        ]
    }

    fn too_few(count: usize) -> TfnError {
        TfnError::TooFewColorPoints { count }
    }
}

/// One anchor of the opacity curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpacityPoint {
    /// Normalized position in `[0, 1]`.
    pub position: f32,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

impl ControlPoint for OpacityPoint {
    type Value = f32;

    fn new(position: f32, alpha: f32) -> Self {
        Self {
            position: clamp_unit(position),
            alpha: clamp_unit(alpha),
        }
    }

    fn position(&self) -> f32 {
        self.position
    }

    fn set_position(&mut self, position: f32) {
        self.position = clamp_unit(position);
    }

    fn value(&self) -> f32 {
        self.alpha
    }

    fn set_value(&mut self, alpha: f32) {
        self.alpha = clamp_unit(alpha);
    }

    fn interpolate(left: &Self, right: &Self, position: f32) -> f32 {
        lerp(left.alpha, right.alpha, left.position, right.position, position)
    }

    fn too_few(count: usize) -> TfnError {
        TfnError::TooFewOpacityPoints { count }
    }
}

/// Clamp to `[0, 1]`. NaN collapses to 0.
pub(crate) fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

fn clamp_rgb(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(clamp_unit)
}
