//! Bracketing-interval search over sorted control points.

use crate::points::ControlPoint;

/// Find the indices of the control points bracketing `p`.
///
/// For `p` strictly inside the domain, returns `(left, left + 1)` where
/// `left` is the last point with `position <= p`. A query that lands
/// exactly on an interior control point therefore starts its own interval
/// and evaluates to that point's value with no rounding.
///
/// At or below the first position returns `(0, 0)`; at or above the last
/// returns `(last, last)`. Callers interpolate these degenerate intervals
/// to the boundary value. NaN is treated as below the domain.
///
/// `points` must be sorted by position. Uses a binary search; the result is
/// identical to a left-to-right scan.
pub fn locate<P: ControlPoint>(points: &[P], p: f32) -> (usize, usize) {
    let Some(last) = points.len().checked_sub(1) else {
        return (0, 0);
    };

    if p.is_nan() || p <= points[0].position() {
        return (0, 0);
    }
    if p >= points[last].position() {
        return (last, last);
    }

    let left = points.partition_point(|pt| pt.position() <= p) - 1;
    (left, left + 1)
}
