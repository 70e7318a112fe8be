//! RangeTrack Core Library
//!
//! Binned aggregation, scale composition, and typed render options for the
//! rangetrack tile pipeline.

pub mod aggregate;
pub mod error;
pub mod options;
pub mod scale;
pub mod types;

// Re-export commonly used types and functions
pub use aggregate::{aggregate, BinGroup};
pub use error::TrackError;
pub use options::{Mode, RenderOptions, ValueScaling};
pub use scale::{make_value_scale, LinearScale, LogScale, TileXScale, ValueScale};
pub use types::{TileData, TileDims, TileId, TilesetInfo, VisibleValues};

/// Version information for the rangetrack core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
