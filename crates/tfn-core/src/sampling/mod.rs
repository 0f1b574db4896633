//! Curve evaluation and dense table sampling.
//!
//! `interval` finds the bracketing pair of control points, `lerp`
//! interpolates inside it, and `table` drives both across a fixed grid.

pub mod interval;
pub mod lerp;
pub mod table;

pub use interval::locate;
pub use lerp::lerp;
pub use table::{SampledTable, sample};
