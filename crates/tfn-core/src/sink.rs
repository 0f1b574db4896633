//! The commit capability: where sampled tables go.
//!
//! The editor knows nothing about textures or devices. After sampling a
//! dirty function it hands the float tables to a [`CommitSink`], which may
//! upload them, forward them over IPC, or drop them.

use crate::error::TfnError;
use crate::function::ValueRange;

/// Consumer of committed transfer-function samples.
pub trait CommitSink {
    /// Receive interleaved RGB floats (`3N`), `(position, alpha)` pairs
    /// (`2N`) and the active value range.
    ///
    /// Returning an error leaves the editor dirty so the caller can retry.
    fn commit(
        &mut self,
        colors: &[f32],
        alphas: &[f32],
        range: ValueRange,
    ) -> Result<(), TfnError>;
}

impl<F> CommitSink for F
where
    F: FnMut(&[f32], &[f32], ValueRange) -> Result<(), TfnError>,
{
    fn commit(
        &mut self,
        colors: &[f32],
        alphas: &[f32],
        range: ValueRange,
    ) -> Result<(), TfnError> {
        self(colors, alphas, range)
    }
}

/// A sink that accepts and discards every commit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl CommitSink for NullSink {
    fn commit(&mut self, _: &[f32], _: &[f32], _: ValueRange) -> Result<(), TfnError> {
        Ok(())
    }
}
