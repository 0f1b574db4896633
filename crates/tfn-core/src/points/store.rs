//! Ordered control-point storage.
//!
//! # Invariants
//! After construction and after every mutation:
//! - at least 2 points, the first at position 0.0 and the last at 1.0
//! - positions are non-decreasing in sequence order
//! - every channel value lies in `[0, 1]`
//!
//! The boundary points are never removed or repositioned. All out-of-range
//! input is clamped or ignored; nothing here panics on a bad index.

use serde::{Deserialize, Deserializer, Serialize};

use super::ControlPoint;
use crate::error::TfnError;
use crate::sampling::interval::locate;

/// An ordered sequence of control points for one curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ControlPoints<P> {
    points: Vec<P>,
}

impl<P: ControlPoint> ControlPoints<P> {
    /// Build a sequence from caller-supplied points.
    ///
    /// Positions and values are clamped to `[0, 1]`, the points are stably
    /// sorted by position, and the first and last points are pinned to 0.0
    /// and 1.0. Fails if fewer than 2 points are supplied.
    pub fn new(points: Vec<P>) -> Result<Self, TfnError> {
        if points.len() < 2 {
            return Err(P::too_few(points.len()));
        }

        let mut points: Vec<P> = points
            .into_iter()
            .map(|pt| P::new(pt.position(), pt.value()))
            .collect();
        points.sort_by(|a, b| a.position().total_cmp(&b.position()));

        let last = points.len() - 1;
        points[0].set_position(0.0);
        points[last].set_position(1.0);

        Ok(Self { points })
    }

    /// Points in order.
    pub fn as_slice(&self) -> &[P] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a sequence holds at least its two boundary points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&P> {
        self.points.get(index)
    }

    fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    fn is_interior(&self, index: usize) -> bool {
        index > 0 && index < self.last_index()
    }

    /// Evaluate the curve at `position` with clamped extrapolation.
    pub fn evaluate(&self, position: f32) -> P::Value {
        let (left, right) = locate(&self.points, position);
        P::interpolate(&self.points[left], &self.points[right], position)
    }

    /// Insert an interior point and return its index.
    ///
    /// `position` is clamped to `[0, 1]`; a position at or outside the
    /// boundary points is a no-op and returns `None`. The point lands after
    /// every existing point with a position `<=` its own, so removing the
    /// returned index restores the previous sequence exactly.
    pub fn insert(&mut self, position: f32, value: P::Value) -> Option<usize> {
        let point = P::new(position, value);
        let p = point.position();
        let first = self.points[0].position();
        let last = self.points[self.last_index()].position();
        if p <= first || p >= last {
            return None;
        }

        let (left, _) = locate(&self.points, p);
        let index = left + 1;
        self.points.insert(index, point);
        Some(index)
    }

    /// Remove an interior point. Boundary or out-of-range indices are ignored.
    ///
    /// Returns whether a point was removed.
    pub fn remove(&mut self, index: usize) -> bool {
        if !self.is_interior(index) {
            return false;
        }
        self.points.remove(index);
        true
    }

    /// Move a point and replace its value.
    ///
    /// Interior points have `position` clamped between their immediate
    /// neighbors, so the order never changes. Boundary points keep their
    /// position; only their value is updated.
    ///
    /// Returns `false` if `index` is out of range.
    pub fn move_point(&mut self, index: usize, position: f32, value: P::Value) -> bool {
        if index >= self.points.len() {
            return false;
        }

        if self.is_interior(index) {
            let lo = self.points[index - 1].position();
            let hi = self.points[index + 1].position();
            let clamped = if position.is_nan() {
                self.points[index].position()
            } else {
                position.clamp(lo, hi)
            };
            self.points[index].set_position(clamped);
        }
        self.points[index].set_value(value);
        true
    }

    /// Replace a point's value in place, leaving its position untouched.
    ///
    /// Returns `false` if `index` is out of range.
    pub fn set_value(&mut self, index: usize, value: P::Value) -> bool {
        match self.points.get_mut(index) {
            Some(point) => {
                point.set_value(value);
                true
            }
            None => false,
        }
    }
}

impl<P: ControlPoint> TryFrom<Vec<P>> for ControlPoints<P> {
    type Error = TfnError;

    fn try_from(points: Vec<P>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

/// Deserialized sequences are sanitized like any other input.
impl<'de, P> Deserialize<'de> for ControlPoints<P>
where
    P: ControlPoint + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let points = Vec::<P>::deserialize(deserializer)?;
        Self::new(points).map_err(serde::de::Error::custom)
    }
}

impl<'a, P> IntoIterator for &'a ControlPoints<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
