use crate::error::TrackError;
use serde::{Deserialize, Serialize};

pub type ZoomLevel = u32;
pub type TilePos = u64;

/// Largest zoom level used for tile-width computation. Beyond this the
/// per-tile width would underflow an f64 anyway.
pub const MAX_ZOOM: ZoomLevel = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId {
    pub zoom_level: ZoomLevel,
    pub position: TilePos,
}

impl TileId {
    pub fn new(zoom_level: ZoomLevel, position: TilePos) -> Self {
        Self {
            zoom_level,
            position,
        }
    }
}

/// One tile's worth of binned signal data.
///
/// `dense` is a flat sequence of fixed-size records, `record_size` numbers
/// each. Whisker-capable data uses `[min, max, mean, std]` records; plain
/// range data uses `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileData {
    pub tile_id: TileId,
    pub dense: Vec<f64>,
    pub record_size: usize,
}

impl TileData {
    pub fn new(tile_id: TileId, dense: Vec<f64>, record_size: usize) -> Self {
        Self {
            tile_id,
            dense,
            record_size,
        }
    }

    /// Number of complete records in `dense`. Trailing numbers short of a
    /// full record are ignored.
    pub fn record_count(&self) -> usize {
        if self.record_size == 0 {
            0
        } else {
            self.dense.len() / self.record_size
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }
}

/// Global tileset metadata, read-only for the pipeline's lifetime.
///
/// Exactly one of `tile_size` and `bins_per_dimension` is populated; the
/// populated one is the domain width of the per-tile index scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilesetInfo {
    pub tile_size: Option<u32>,
    pub bins_per_dimension: Option<u32>,
    pub max_position: f64,
}

impl TilesetInfo {
    pub fn with_tile_size(tile_size: u32, max_position: f64) -> Self {
        Self {
            tile_size: Some(tile_size),
            bins_per_dimension: None,
            max_position,
        }
    }

    pub fn with_bins_per_dimension(bins_per_dimension: u32, max_position: f64) -> Self {
        Self {
            tile_size: None,
            bins_per_dimension: Some(bins_per_dimension),
            max_position,
        }
    }

    /// Bins per tile, from whichever field is populated.
    pub fn bin_count(&self) -> Result<u32, TrackError> {
        match (self.tile_size, self.bins_per_dimension) {
            (Some(n), None) | (None, Some(n)) => Ok(n),
            _ => Err(TrackError::AmbiguousBinCount),
        }
    }
}

/// Genomic position and width of one tile at one zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDims {
    pub tile_x: f64,
    pub tile_width: f64,
}

/// Value range across all currently visible tiles, supplied by the host
/// once per render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleValues {
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// Default tile-position-and-dimension lookup: the dataset spans
/// `[0, max_position)` and each zoom level halves the tile width.
pub fn tile_pos_and_dims(
    tileset: &TilesetInfo,
    zoom_level: ZoomLevel,
    position: TilePos,
) -> TileDims {
    let zoom = zoom_level.min(MAX_ZOOM);
    let tile_width = tileset.max_position / (1u64 << zoom) as f64;
    TileDims {
        tile_x: position as f64 * tile_width,
        tile_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_count_requires_exactly_one_source() {
        let info = TilesetInfo::with_tile_size(256, 1000.0);
        assert_eq!(info.bin_count().unwrap(), 256);

        let info = TilesetInfo::with_bins_per_dimension(1024, 1000.0);
        assert_eq!(info.bin_count().unwrap(), 1024);

        let both = TilesetInfo {
            tile_size: Some(256),
            bins_per_dimension: Some(1024),
            max_position: 1000.0,
        };
        assert_eq!(both.bin_count(), Err(TrackError::AmbiguousBinCount));

        let neither = TilesetInfo {
            tile_size: None,
            bins_per_dimension: None,
            max_position: 1000.0,
        };
        assert_eq!(neither.bin_count(), Err(TrackError::AmbiguousBinCount));
    }

    #[test]
    fn tile_dims_halve_per_zoom_level() {
        let info = TilesetInfo::with_tile_size(256, 3200.0);

        let root = tile_pos_and_dims(&info, 0, 0);
        assert_eq!(root.tile_x, 0.0);
        assert_eq!(root.tile_width, 3200.0);

        let dims = tile_pos_and_dims(&info, 2, 3);
        assert_eq!(dims.tile_width, 800.0);
        assert_eq!(dims.tile_x, 2400.0);
    }

    #[test]
    fn record_count_ignores_trailing_numbers() {
        let data = TileData::new(TileId::new(0, 0), vec![1.0, 2.0, 3.0, 4.0, 5.0], 2);
        assert_eq!(data.record_count(), 2);
    }
}
