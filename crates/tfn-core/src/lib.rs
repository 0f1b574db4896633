//! Transfer-function core — 1D color/opacity transfer functions for
//! volume rendering.
//!
//! This crate holds the control-point model, interval search,
//! interpolation, dense table sampling, and the editing session that
//! commits sampled tables to a caller-supplied sink. No GPU, file-format,
//! or UI dependencies.

pub mod config;
pub mod editor;
pub mod error;
pub mod function;
pub mod points;
pub mod presets;
pub mod sampling;
pub mod sink;

// Re-exports for convenience.
pub use config::EditorConfig;
pub use editor::TransferFunctionEditor;
pub use error::TfnError;
pub use function::{LoadedFunction, TransferFunction, ValueRange};
pub use points::{ColorPoint, ControlPoint, ControlPoints, OpacityPoint};
pub use sampling::table::{SampledTable, sample};
pub use sink::{CommitSink, NullSink};
