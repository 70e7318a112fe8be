//! The 1-D scales the pipeline composes: a tile-local index scale, the
//! shared value scale, and the companion color scale.

use crate::options::ValueScaling;
use crate::types::{TileDims, VisibleValues};

/// Smallest usable lower bound for a logarithmic value-scale domain.
const MIN_LOG_FLOOR: f64 = 1e-6;

/// Output range of the companion color scale.
const COLOR_RANGE: (f64, f64) = (254.0, 0.0);

/// Affine interpolation from a numeric domain onto a numeric range.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    /// Identity over `[0, extent]`, the usual genomic-position -> pixel
    /// stand-in in tests and simple hosts.
    pub fn identity(extent: f64) -> Self {
        Self::new((0.0, extent), (0.0, extent))
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let mut t = if span == 0.0 {
            0.5
        } else {
            (value - d0) / span
        };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        r0 + t * (r1 - r0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range = range;
        self
    }

    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }
}

/// Logarithmic interpolation; values at or below zero map to NaN, which is
/// why the track guards log scaling against negative domains upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct LogScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LogScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1.ln() - d0.ln();
        let mut t = if span == 0.0 {
            0.5
        } else {
            (value.ln() - d0.ln()) / span
        };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        r0 + t * (r1 - r0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range = range;
        self
    }

    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }
}

/// Value -> vertical-pixel mapping shared by every tile in a render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueScale {
    Linear(LinearScale),
    Log(LogScale),
}

impl ValueScale {
    pub fn scale(&self, value: f64) -> f64 {
        match self {
            ValueScale::Linear(scale) => scale.scale(value),
            ValueScale::Log(scale) => scale.scale(value),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        match self {
            ValueScale::Linear(scale) => scale.domain(),
            ValueScale::Log(scale) => scale.domain(),
        }
    }

    /// Companion heat-style color scale: same domain, output remapped onto
    /// `[254, 0]` and clamped. Neither drawing mode consumes it, but it is
    /// part of the per-pass contract for downstream color lookups.
    pub fn to_color_scale(&self) -> ValueScale {
        match self {
            ValueScale::Linear(scale) => {
                ValueScale::Linear(scale.clone().with_range(COLOR_RANGE).clamped())
            }
            ValueScale::Log(scale) => {
                ValueScale::Log(scale.clone().with_range(COLOR_RANGE).clamped())
            }
        }
    }
}

/// Builds the per-pass value scale from the visible value range.
///
/// The pixel range descends (larger value, smaller y) so bars grow upward
/// from the track floor. For log scaling the lower bound falls back to the
/// visible median when the minimum is not positive, keeping the scale
/// stable when zero-filled tiles are in view; a negative maximum is left
/// in the domain so the per-tile log guard can reject it.
pub fn make_value_scale(
    scaling: ValueScaling,
    visible: &VisibleValues,
    plot_height: f64,
) -> ValueScale {
    match scaling {
        ValueScaling::Linear => ValueScale::Linear(LinearScale::new(
            (visible.min, visible.max),
            (plot_height, 0.0),
        )),
        ValueScaling::Log => {
            let floor = if visible.min > 0.0 {
                visible.min
            } else {
                visible.median.abs().max(MIN_LOG_FLOOR)
            };
            ValueScale::Log(LogScale::new((floor, visible.max), (plot_height, 0.0)))
        }
    }
}

/// Composition of the tile-local index scale with the track's
/// genomic-position -> pixel scale.
///
/// The index scale maps a bin index in `[0, bin_count]` onto the tile's
/// genomic span `[tile_x, tile_x + tile_width]`; every pixel-space X
/// coordinate the geometry emitter uses comes out of `pixel`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileXScale {
    index: LinearScale,
    outer: LinearScale,
}

impl TileXScale {
    pub fn new(bin_count: u32, dims: TileDims, outer: LinearScale) -> Self {
        let index = LinearScale::new(
            (0.0, bin_count as f64),
            (dims.tile_x, dims.tile_x + dims.tile_width),
        );
        Self { index, outer }
    }

    /// Genomic position of a bin index, used for the max-position clip.
    pub fn genomic(&self, bin_index: f64) -> f64 {
        self.index.scale(bin_index)
    }

    pub fn pixel(&self, bin_index: f64) -> f64 {
        self.outer.scale(self.index.scale(bin_index))
    }

    pub fn outer(&self) -> &LinearScale {
        &self.outer
    }
}
