//! Track shell: owns the per-tile surfaces and runs the render pipeline.

use crate::geometry;
use crate::surface::{Surface, SvgRect};
use anyhow::Context as _;
use rangetrack_core::types::{TilePos, ZoomLevel};
use rangetrack_core::{
    aggregate, LinearScale, Mode, RenderOptions, TileData, TileDims, TileId, TileXScale,
    TilesetInfo, TrackError, ValueScale, ValueScaling, VisibleValues,
};
use std::collections::HashMap;

/// Host capabilities, injected instead of inherited.
///
/// `tile_pos_and_dims` and `make_value_scale` ship with default
/// implementations covering the standard `[0, max_position)` pyramid; hosts
/// with their own coordinate bookkeeping override them.
pub trait TrackContext {
    /// Current genomic-position -> pixel scale. Cloned once per tile render
    /// and recorded as the tile's drawn-at scale.
    fn x_scale(&self) -> LinearScale;

    /// Min/median/max across currently visible tiles, sampled once per
    /// render pass.
    fn visible_values(&self) -> VisibleValues;

    fn tile_pos_and_dims(
        &self,
        tileset: &TilesetInfo,
        zoom_level: ZoomLevel,
        position: TilePos,
    ) -> TileDims {
        rangetrack_core::types::tile_pos_and_dims(tileset, zoom_level, position)
    }

    fn make_value_scale(
        &self,
        scaling: ValueScaling,
        visible: &VisibleValues,
        plot_height: f64,
    ) -> ValueScale {
        rangetrack_core::make_value_scale(scaling, visible, plot_height)
    }
}

/// One tile as the shell holds it: data, drawing surface, the minMax
/// side-channel records, and the x-scale it was last drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub data: TileData,
    pub surface: Option<Surface>,
    pub svg_data: Vec<SvgRect>,
    pub drawn_at_scale: Option<LinearScale>,
}

impl Tile {
    pub fn new(data: TileData) -> Self {
        Self {
            data,
            surface: Some(Surface::new()),
            svg_data: Vec::new(),
            drawn_at_scale: None,
        }
    }
}

/// Outcome of rendering one tile. Everything except `Rendered` is a
/// recoverable per-tile condition, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Rendered,
    EmptyData,
    MissingSurface,
    LogScaleNegativeDomain,
    UnsupportedRecordLayout,
    UnknownTile,
}

/// Scales shared by every tile of one render pass. Built once per pass so
/// all visible tiles sit on a consistent vertical scale.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    pub value_scale: ValueScale,
    pub color_scale: ValueScale,
}

/// The range track: a tile arena plus the rendering pipeline over it.
pub struct RangeTrack<C: TrackContext> {
    context: C,
    tileset_info: TilesetInfo,
    bin_count: u32,
    options: RenderOptions,
    mode: Mode,
    dimensions: (f64, f64),
    pass: RenderPass,
    tiles: HashMap<String, Tile>,
}

impl<C: TrackContext> RangeTrack<C> {
    /// Builds a track, validating tileset info and options up front.
    pub fn new(
        context: C,
        tileset_info: TilesetInfo,
        options: RenderOptions,
        dimensions: (f64, f64),
    ) -> Result<Self, TrackError> {
        let bin_count = tileset_info.bin_count()?;
        options.validate()?;
        let mode = options.mode;
        let pass = Self::build_pass(&context, &options, dimensions.1);
        Ok(Self {
            context,
            tileset_info,
            bin_count,
            options,
            mode,
            dimensions,
            pass,
            tiles: HashMap::new(),
        })
    }

    fn build_pass(context: &C, options: &RenderOptions, plot_height: f64) -> RenderPass {
        let visible = context.visible_values();
        let value_scale = context.make_value_scale(options.value_scaling, &visible, plot_height);
        let color_scale = value_scale.to_color_scale();
        RenderPass {
            value_scale,
            color_scale,
        }
    }

    /// Rebuilds the pass scales from the host's current visible values.
    /// Call once per render pass, before rendering the pass's tiles.
    pub fn begin_pass(&mut self) {
        self.pass = Self::build_pass(&self.context, &self.options, self.dimensions.1);
    }

    /// Registers a tile under its mode-qualified local id and renders it.
    pub fn insert_tile(&mut self, data: TileData) -> String {
        let local_id = self.tile_to_local_id(&data.tile_id);
        self.tiles.insert(local_id.clone(), Tile::new(data));
        self.render_tile(&local_id);
        local_id
    }

    /// Renders exactly one tile, synchronously, to completion.
    pub fn render_tile(&mut self, local_id: &str) -> RenderStatus {
        let Some(mut tile) = self.tiles.remove(local_id) else {
            return RenderStatus::UnknownTile;
        };
        let status = self.render_into(&mut tile);
        self.tiles.insert(local_id.to_string(), tile);
        status
    }

    fn render_into(&self, tile: &mut Tile) -> RenderStatus {
        let Some(surface) = tile.surface.as_mut() else {
            return RenderStatus::MissingSurface;
        };
        if tile.data.is_empty() {
            return RenderStatus::EmptyData;
        }

        let value_scale = &self.pass.value_scale;
        if self.options.value_scaling == ValueScaling::Log && value_scale.domain().1 < 0.0 {
            log::warn!(
                "negative values present when using a log scale, domain {:?}",
                value_scale.domain()
            );
            surface.clear();
            tile.svg_data.clear();
            return RenderStatus::LogScaleNegativeDomain;
        }

        if self.mode == Mode::Whisker && tile.data.record_size < 4 {
            log::warn!(
                "whisker mode needs [min, max, mean, std] records, tile {}.{} has record size {}",
                tile.data.tile_id.zoom_level,
                tile.data.tile_id.position,
                tile.data.record_size
            );
            surface.clear();
            tile.svg_data.clear();
            return RenderStatus::UnsupportedRecordLayout;
        }

        let dims = self.context.tile_pos_and_dims(
            &self.tileset_info,
            tile.data.tile_id.zoom_level,
            tile.data.tile_id.position,
        );
        let xs = TileXScale::new(self.bin_count, dims, self.context.x_scale());
        tile.drawn_at_scale = Some(xs.outer().clone());

        let resolution = self.options.resolution;
        let groups = aggregate(&tile.data.dense, tile.data.record_size, resolution);
        let max_position = self.tileset_info.max_position;

        match self.mode {
            Mode::MinMax => {
                let (layer, svg_data) = geometry::emit_min_max(
                    &groups,
                    &xs,
                    value_scale,
                    resolution,
                    max_position,
                    &self.options,
                );
                surface.replace(vec![layer]);
                tile.svg_data = svg_data;
            }
            Mode::Whisker => {
                let layers = geometry::emit_whisker(
                    &groups,
                    &xs,
                    value_scale,
                    resolution,
                    max_position,
                    self.dimensions.1,
                    &self.options,
                );
                surface.replace(layers);
                tile.svg_data.clear();
            }
        }

        RenderStatus::Rendered
    }

    /// Applies new options and re-renders every owned tile under a fresh
    /// pass. A no-op when nothing changed, unless `force` is set.
    pub fn rerender(&mut self, options: RenderOptions, force: bool) -> Result<(), TrackError> {
        options.validate()?;
        if !force && options == self.options {
            return Ok(());
        }

        let mode_changed = options.mode != self.mode;
        self.mode = options.mode;
        self.options = options;

        if mode_changed {
            // tiles rendered under different modes are distinct cache
            // entries, so the arena is rekeyed under the new mode
            let tiles = std::mem::take(&mut self.tiles);
            let rekeyed = tiles
                .into_values()
                .map(|tile| (self.tile_to_local_id(&tile.data.tile_id), tile))
                .collect();
            self.tiles = rekeyed;
        }

        self.begin_pass();
        self.render_all();
        Ok(())
    }

    /// Shell seam for host-side JSON option bags.
    pub fn rerender_from_json(&mut self, raw: &serde_json::Value, force: bool) -> anyhow::Result<()> {
        let options: RenderOptions =
            serde_json::from_value(raw.clone()).context("invalid range track options")?;
        self.rerender(options, force)?;
        Ok(())
    }

    /// Stores new track dimensions and synchronously re-renders every
    /// owned tile on the resized value scale.
    pub fn set_dimensions(&mut self, new_dimensions: (f64, f64)) {
        self.dimensions = new_dimensions;
        self.begin_pass();
        self.render_all();
    }

    fn render_all(&mut self) {
        let mut tiles = std::mem::take(&mut self.tiles);
        for tile in tiles.values_mut() {
            self.render_into(tile);
        }
        log::debug!("re-rendered {} tiles", tiles.len());
        self.tiles = tiles;
    }

    /// Mode-qualified cache key: `"<zoom>.<position>.<mode>"`.
    pub fn tile_to_local_id(&self, tile_id: &TileId) -> String {
        format!("{}.{}.{}", tile_id.zoom_level, tile_id.position, self.mode)
    }

    /// Identical to the local id; there is no server-side aggregation
    /// variant of this track.
    pub fn tile_to_remote_id(&self, tile_id: &TileId) -> String {
        self.tile_to_local_id(tile_id)
    }

    pub fn tile(&self, local_id: &str) -> Option<&Tile> {
        self.tiles.get(local_id)
    }

    pub fn tile_mut(&mut self, local_id: &str) -> Option<&mut Tile> {
        self.tiles.get_mut(local_id)
    }

    pub fn tiles(&self) -> impl Iterator<Item = (&String, &Tile)> {
        self.tiles.iter()
    }

    pub fn pass(&self) -> &RenderPass {
        &self.pass
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn dimensions(&self) -> (f64, f64) {
        self.dimensions
    }

    pub fn tileset_info(&self) -> &TilesetInfo {
        &self.tileset_info
    }
}
