use crate::error::TrackError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendering mode for a range track tile.
///
/// Deserialization is lenient: any string other than `"whisker"` maps to
/// `MinMax`, so hosts sending stale or misspelled option bags still render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "camelCase")]
pub enum Mode {
    #[default]
    MinMax,
    Whisker,
}

impl From<String> for Mode {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<&str> for Mode {
    fn from(raw: &str) -> Self {
        match raw {
            "whisker" => Mode::Whisker,
            _ => Mode::MinMax,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::MinMax => write!(f, "minMax"),
            Mode::Whisker => write!(f, "whisker"),
        }
    }
}

/// Vertical scaling of raw values into pixel offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueScaling {
    #[default]
    Linear,
    Log,
}

/// Typed per-render-pass options.
///
/// Mirrors the host-side JSON option bag (camelCase keys, every field
/// defaulted) but is validated once per options update instead of being
/// re-parsed on every draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    pub mode: Mode,
    /// Re-binning factor: how many source bins merge into one rendered bin.
    pub resolution: usize,
    pub value_scaling: ValueScaling,
    pub min_max_color: String,
    pub min_max_opacity: f64,
    pub mean_color: String,
    pub mean_opacity: f64,
    pub std_fill_color: String,
    pub std_fill_opacity: f64,
    pub std_stroke_color: String,
    pub std_stroke_opacity: f64,
    pub connector_color: String,
    pub connector_opacity: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: Mode::MinMax,
            resolution: 1,
            value_scaling: ValueScaling::Linear,
            min_max_color: "black".to_string(),
            min_max_opacity: 0.66,
            mean_color: "black".to_string(),
            mean_opacity: 1.0,
            std_fill_color: "white".to_string(),
            std_fill_opacity: 1.0,
            std_stroke_color: "black".to_string(),
            std_stroke_opacity: 1.0,
            connector_color: "black".to_string(),
            connector_opacity: 1.0,
        }
    }
}

/// Option names as the host enumerates them, camelCase.
pub const AVAILABLE_OPTIONS: &[&str] = &[
    "mode",
    "resolution",
    "valueScaling",
    "minMaxColor",
    "minMaxOpacity",
    "meanColor",
    "meanOpacity",
    "stdFillColor",
    "stdFillOpacity",
    "stdStrokeColor",
    "stdStrokeOpacity",
    "connectorColor",
    "connectorOpacity",
];

impl RenderOptions {
    pub fn validate(&self) -> Result<(), TrackError> {
        if self.resolution < 1 {
            return Err(TrackError::InvalidResolution);
        }
        for (layer, value) in [
            ("minMax", self.min_max_opacity),
            ("mean", self.mean_opacity),
            ("stdFill", self.std_fill_opacity),
            ("stdStroke", self.std_stroke_opacity),
            ("connector", self.connector_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TrackError::OpacityOutOfRange { layer, value });
            }
        }
        Ok(())
    }
}
