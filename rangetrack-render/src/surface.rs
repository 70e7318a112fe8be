//! Immediate-mode drawing-surface model.
//!
//! Instead of mutating a host scene graph child-by-child, each render
//! rebuilds a tile's layer list wholesale and swaps it in. The host
//! re-consumes `Surface::layers` every frame, which keeps partial-update
//! bugs out of the mode-switch path.

use serde::Serialize;

/// A positioned, axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Fill style; colors pass through as strings, numeric conversion is
/// host-side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fill {
    pub color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub width: f64,
    pub color: String,
    pub opacity: f64,
}

/// Which visual layer a set of rectangles belongs to. Whisker layers are
/// listed in their fixed z-order, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayerKind {
    MinMax,
    Connector,
    MinMaxTicks,
    StdBand,
    MeanTick,
}

/// One fill layer of positioned rectangles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub kind: LayerKind,
    pub fill: Fill,
    pub stroke: Option<Stroke>,
    pub rects: Vec<Rect>,
}

impl Layer {
    pub fn filled(kind: LayerKind, color: &str, opacity: f64) -> Self {
        Self {
            kind,
            fill: Fill {
                color: color.to_string(),
                opacity,
            },
            stroke: None,
            rects: Vec::new(),
        }
    }

    pub fn with_stroke(mut self, width: f64, color: &str, opacity: f64) -> Self {
        self.stroke = Some(Stroke {
            width,
            color: color.to_string(),
            opacity,
        });
        self
    }
}

/// Per-tile drawing surface, owned by the track shell and mutated only by
/// clear-and-replace.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Surface {
    layers: Vec<Layer>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }

    pub fn replace(&mut self, layers: Vec<Layer>) {
        self.layers = layers;
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Side-channel record for non-pixel consumers (export, tooltips). One is
/// produced per rectangle the minMax mode draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvgRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}
