use thiserror::Error;

/// Construction and options-validation errors for the range track.
///
/// Rendering itself never returns these; per-tile render aborts are
/// reported through `RenderStatus` and are recoverable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    #[error("tileset info must populate exactly one of tile_size and bins_per_dimension")]
    AmbiguousBinCount,

    #[error("resolution must be a positive integer")]
    InvalidResolution,

    #[error("{layer} opacity {value} is outside [0, 1]")]
    OpacityOutOfRange { layer: &'static str, value: f64 },
}
