/*!
# RangeTrack Rendering

Turns aggregated tile bins into layered screen-space geometry and exposes
the track shell a host genome browser drives: per-tile rendering in two
modes (min/max band and whisker), options-driven re-renders, and the static
track descriptor.
*/

pub mod config;
pub mod geometry;
pub mod surface;
pub mod track;

pub use config::{track_config, TrackConfig};
pub use surface::{Fill, Layer, LayerKind, Rect, Stroke, Surface, SvgRect};
pub use track::{RangeTrack, RenderPass, RenderStatus, Tile, TrackContext};
