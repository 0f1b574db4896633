//! Per-channel linear interpolation.

/// Linearly interpolate between `(p0, v0)` and `(p1, v1)` at `p`.
///
/// ```text
/// value = v0 + (v1 − v0) × (p − p0) / (p1 − p0)
/// ```
///
/// A degenerate interval (`p1 == p0`) returns `v0`.
pub fn lerp(v0: f32, v1: f32, p0: f32, p1: f32, p: f32) -> f32 {
    if p1 == p0 {
        return v0;
    }
    v0 + (v1 - v0) * (p - p0) / (p1 - p0)
}
