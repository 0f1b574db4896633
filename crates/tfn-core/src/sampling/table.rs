//! Dense lookup-table sampling of a transfer function.
//!
//! # Layout
//! For a resolution `N` the grid positions are `p_i = i / (N − 1)`:
//! - `rgba`: `N` byte quads `(r, g, b, 255)`, the preview/texture palette.
//!   Opacity is not baked into the byte alpha.
//! - `colors`: `3N` floats, `r, g, b` per sample.
//! - `alphas`: `2N` floats, `(p_i, alpha)` pairs per sample.
//!
//! # Complexity
//! O(N log K) for K control points.

use crate::error::TfnError;
use crate::points::{ColorPoint, ControlPoints, OpacityPoint};

/// Output of [`sample`].
#[derive(Debug, Clone, PartialEq)]
pub struct SampledTable {
    /// Number of grid samples.
    pub resolution: usize,
    /// Byte-quantized RGBA palette, alpha fixed at 255.
    pub rgba: Vec<[u8; 4]>,
    /// Interleaved RGB floats, `3 × resolution` entries.
    pub colors: Vec<f32>,
    /// Interleaved `(position, alpha)` pairs, `2 × resolution` entries.
    pub alphas: Vec<f32>,
}

impl SampledTable {
    /// The palette as a flat byte slice, ready for an RGBA8 texture upload.
    pub fn rgba_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.rgba)
    }

    /// RGB of sample `i`.
    pub fn color(&self, i: usize) -> Option<[f32; 3]> {
        self.colors
            .get(3 * i..3 * i + 3)
            .map(|c| [c[0], c[1], c[2]])
    }

    /// Alpha of sample `i`.
    pub fn alpha(&self, i: usize) -> Option<f32> {
        self.alphas.get(2 * i + 1).copied()
    }
}

/// Sample both curves on a uniform grid of `resolution` points.
///
/// Pure: the point sequences are not modified and identical inputs give
/// identical output. Fails with [`TfnError::InvalidResolution`] when
/// `resolution < 2`.
pub fn sample(
    colors: &ControlPoints<ColorPoint>,
    opacity: &ControlPoints<OpacityPoint>,
    resolution: usize,
) -> Result<SampledTable, TfnError> {
    if resolution < 2 {
        return Err(TfnError::InvalidResolution(resolution));
    }

    let mut rgba = Vec::with_capacity(resolution);
    let mut color_out = Vec::with_capacity(3 * resolution);
    let mut alpha_out = Vec::with_capacity(2 * resolution);

    let step = 1.0 / (resolution - 1) as f32;
    for i in 0..resolution {
        let p = (i as f32 * step).clamp(0.0, 1.0);

        let [r, g, b] = colors.evaluate(p);
        color_out.extend_from_slice(&[r, g, b]);
        rgba.push([quantize(r), quantize(g), quantize(b), u8::MAX]);

        let a = opacity.evaluate(p);
        alpha_out.extend_from_slice(&[p, a]);
    }

    Ok(SampledTable {
        resolution,
        rgba,
        colors: color_out,
        alphas: alpha_out,
    })
}

/// `[0, 1]` float to byte, truncating.
fn quantize(v: f32) -> u8 {
    (v * 255.0) as u8
}
