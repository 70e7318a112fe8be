//! Geometry emission: walks aggregated bins and produces layered
//! rectangles for the two visual encodings.

use crate::surface::{Layer, LayerKind, Rect, SvgRect};
use rangetrack_core::{BinGroup, RenderOptions, TileXScale, ValueScale};

/// Per-group horizontal placement shared by both modes.
///
/// Returns `None` once the group's first source bin lies past the end of
/// the coordinate system; the caller stops emitting for this tile.
fn group_span(
    xs: &TileXScale,
    group_index: usize,
    resolution: usize,
    max_position: f64,
) -> Option<(f64, f64)> {
    let d_pos = (group_index * resolution) as f64;
    if xs.genomic(d_pos) > max_position {
        return None;
    }
    let x = xs.pixel(d_pos);
    let width = xs.pixel(d_pos + resolution as f64) - x;
    Some((x, width))
}

/// minMax mode: one filled rectangle per group spanning the scaled min/max
/// values, plus one side-channel record per drawn rectangle.
pub fn emit_min_max(
    groups: &[BinGroup],
    xs: &TileXScale,
    value_scale: &ValueScale,
    resolution: usize,
    max_position: f64,
    options: &RenderOptions,
) -> (Layer, Vec<SvgRect>) {
    let mut layer = Layer::filled(
        LayerKind::MinMax,
        &options.min_max_color,
        options.min_max_opacity,
    );
    let mut svg_data = Vec::with_capacity(groups.len());

    for (i, group) in groups.iter().enumerate() {
        let Some((x, width)) = group_span(xs, i, resolution, max_position) else {
            break;
        };

        let y_top = value_scale.scale(group.max);
        let y_bottom = value_scale.scale(group.min);
        let diff = y_bottom - y_top;
        let height = if diff.is_finite() { diff.max(1.0) } else { 1.0 };

        layer.rects.push(Rect::new(x, y_top, width, height));
        svg_data.push(SvgRect {
            x,
            y: y_top,
            width,
            height,
            color: options.min_max_color.clone(),
        });
    }

    (layer, svg_data)
}

/// whisker mode: four layers in fixed z-order, bottom to top: vertical
/// connector, min/max tick marks, standard-deviation band, mean tick.
pub fn emit_whisker(
    groups: &[BinGroup],
    xs: &TileXScale,
    value_scale: &ValueScale,
    resolution: usize,
    max_position: f64,
    plot_height: f64,
    options: &RenderOptions,
) -> Vec<Layer> {
    let mut connector = Layer::filled(
        LayerKind::Connector,
        &options.connector_color,
        options.connector_opacity,
    );
    let mut min_max = Layer::filled(
        LayerKind::MinMaxTicks,
        &options.min_max_color,
        options.min_max_opacity,
    );
    let mut std_band = Layer::filled(
        LayerKind::StdBand,
        &options.std_fill_color,
        options.std_fill_opacity,
    )
    .with_stroke(1.0, &options.std_stroke_color, options.std_stroke_opacity);
    let mut mean = Layer::filled(LayerKind::MeanTick, &options.mean_color, options.mean_opacity);

    for (i, group) in groups.iter().enumerate() {
        let Some((x, width)) = group_span(xs, i, resolution, max_position) else {
            break;
        };

        let y_min = value_scale.scale(group.min);
        let y_max = value_scale.scale(group.max);
        let y_mean = value_scale.scale(group.mean);
        let std = (plot_height - value_scale.scale(group.std)).abs();

        // 1 px wide, centered on x + resolution/2
        connector.rects.push(Rect::new(
            x + resolution as f64 / 2.0 - 0.5,
            y_max,
            1.0,
            y_min - y_max,
        ));

        min_max.rects.push(Rect::new(x, y_min, width, 1.0));
        min_max.rects.push(Rect::new(x, y_max, width, 1.0));

        std_band
            .rects
            .push(Rect::new(x, y_mean - std, width, 2.0 * std));

        mean.rects.push(Rect::new(x, y_mean, width, 1.0));
    }

    vec![connector, min_max, std_band, mean]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangetrack_core::types::tile_pos_and_dims;
    use rangetrack_core::{aggregate, LinearScale, TilesetInfo};

    // Pixel y grows downward: value 0 sits at y = 10, value 10 at y = 0.
    fn descending_value_scale() -> ValueScale {
        ValueScale::Linear(LinearScale::new((0.0, 10.0), (10.0, 0.0)))
    }

    // 3 bins over pixel span [0, 30): bin i starts at pixel 10 * i.
    fn three_bin_scale(max_position: f64) -> TileXScale {
        let info = TilesetInfo::with_tile_size(3, max_position);
        let dims = tile_pos_and_dims(&info, 0, 0);
        TileXScale::new(3, dims, LinearScale::identity(max_position))
    }

    #[test]
    fn min_max_emits_one_rect_per_bin_at_native_resolution() {
        let dense = vec![1.0, 5.0, 2.0, 4.0, 0.0, 9.0];
        let groups = aggregate(&dense, 2, 1);
        let xs = three_bin_scale(30.0);
        let opts = RenderOptions::default();

        let (layer, svg) = emit_min_max(&groups, &xs, &descending_value_scale(), 1, 30.0, &opts);

        assert_eq!(layer.rects.len(), 3);
        assert_eq!(svg.len(), 3);

        // y spans [scale(5), scale(1)] -> height 4, then 2, then 9
        assert_eq!(layer.rects[0], Rect::new(0.0, 5.0, 10.0, 4.0));
        assert_eq!(layer.rects[1], Rect::new(10.0, 6.0, 10.0, 2.0));
        assert_eq!(layer.rects[2], Rect::new(20.0, 1.0, 10.0, 9.0));

        assert_eq!(svg[0].color, "black");
        assert_eq!((svg[2].x, svg[2].height), (20.0, 9.0));
    }

    #[test]
    fn min_max_rebins_at_coarser_resolution() {
        let dense = vec![1.0, 5.0, 2.0, 4.0, 0.0, 9.0];
        let groups = aggregate(&dense, 2, 2);
        let xs = three_bin_scale(30.0);
        let opts = RenderOptions::default();

        let (layer, _) = emit_min_max(&groups, &xs, &descending_value_scale(), 2, 30.0, &opts);

        assert_eq!(layer.rects.len(), 2);
        // group 0 covers bins {0, 1}: min 1, max 5
        assert_eq!(layer.rects[0], Rect::new(0.0, 5.0, 20.0, 4.0));
        // group 1 is the trailing partial group, bin {2} alone
        assert_eq!(layer.rects[1], Rect::new(20.0, 1.0, 20.0, 9.0));
    }

    #[test]
    fn min_max_height_falls_back_to_one() {
        // flat bin (min == max) and a NaN bin
        let dense = vec![3.0, 3.0, f64::NAN, f64::NAN];
        let groups = aggregate(&dense, 2, 1);
        let xs = three_bin_scale(30.0);
        let opts = RenderOptions::default();

        let (layer, _) = emit_min_max(&groups, &xs, &descending_value_scale(), 1, 30.0, &opts);

        assert_eq!(layer.rects[0].height, 1.0);
        assert_eq!(layer.rects[1].height, 1.0);
    }

    #[test]
    fn clip_stops_at_max_position() {
        let dense = vec![1.0, 5.0, 2.0, 4.0, 0.0, 9.0];
        let groups = aggregate(&dense, 2, 1);
        // bins start at genomic 0, 10, 20; clip everything past 15
        let xs = three_bin_scale(30.0);
        let opts = RenderOptions::default();

        let (layer, svg) = emit_min_max(&groups, &xs, &descending_value_scale(), 1, 15.0, &opts);

        assert_eq!(layer.rects.len(), 2);
        // the clipped group produces no side-channel record either
        assert_eq!(svg.len(), 2);

        let layers = emit_whisker(&groups, &xs, &descending_value_scale(), 1, 15.0, 10.0, &opts);
        for layer in &layers {
            let per_group = if layer.kind == LayerKind::MinMaxTicks { 2 } else { 1 };
            assert_eq!(layer.rects.len(), 2 * per_group);
        }
    }

    #[test]
    fn whisker_layers_come_in_z_order_with_spec_defaults() {
        let dense = vec![1.0, 5.0, 3.0, 2.0];
        let groups = aggregate(&dense, 4, 1);
        let xs = three_bin_scale(30.0);
        let opts = RenderOptions::default();

        let layers = emit_whisker(&groups, &xs, &descending_value_scale(), 1, 30.0, 10.0, &opts);

        assert_eq!(layers.len(), 4);
        assert_eq!(layers[0].kind, LayerKind::Connector);
        assert_eq!(layers[1].kind, LayerKind::MinMaxTicks);
        assert_eq!(layers[2].kind, LayerKind::StdBand);
        assert_eq!(layers[3].kind, LayerKind::MeanTick);

        assert_eq!(layers[0].fill.color, "black");
        assert_eq!(layers[0].fill.opacity, 1.0);
        assert_eq!(layers[1].fill.opacity, 0.66);
        assert_eq!(layers[2].fill.color, "white");
        let stroke = layers[2].stroke.as_ref().expect("std band stroke");
        assert_eq!(stroke.color, "black");
        assert_eq!(stroke.opacity, 1.0);
        assert!(layers[3].stroke.is_none());
    }

    #[test]
    fn connector_stays_centered_at_coarser_resolution() {
        let dense = vec![
            1.0, 5.0, 3.0, 2.0, //
            2.0, 4.0, 3.0, 0.5,
        ];
        let groups = aggregate(&dense, 4, 2);
        let xs = three_bin_scale(30.0);
        let opts = RenderOptions::default();

        let layers = emit_whisker(&groups, &xs, &descending_value_scale(), 2, 30.0, 10.0, &opts);

        // center sits at x + resolution/2, in bin units
        let connector = layers[0].rects[0];
        assert_eq!(connector.width, 1.0);
        assert_eq!(connector.x + connector.width / 2.0, 1.0);
    }

    #[test]
    fn whisker_geometry_per_group() {
        // record [min 1, max 5, mean 3, std 2] under scale(v) = 10 - v:
        // y_min = 9, y_max = 5, y_mean = 7, std half-height = |10 - 8| = 2
        let dense = vec![1.0, 5.0, 3.0, 2.0];
        let groups = aggregate(&dense, 4, 1);
        let xs = three_bin_scale(30.0);
        let opts = RenderOptions::default();

        let layers = emit_whisker(&groups, &xs, &descending_value_scale(), 1, 30.0, 10.0, &opts);

        // connector: 1 px wide, from y_max down to y_min, centered on
        // x + resolution/2
        let connector = layers[0].rects[0];
        assert_eq!(connector, Rect::new(0.0, 5.0, 1.0, 4.0));
        assert_eq!(connector.x + connector.width / 2.0, 0.5);
        // min and max ticks, 1 px tall, spanning the group width
        assert_eq!(layers[1].rects[0], Rect::new(0.0, 9.0, 10.0, 1.0));
        assert_eq!(layers[1].rects[1], Rect::new(0.0, 5.0, 10.0, 1.0));
        // std band symmetric around the mean line
        assert_eq!(layers[2].rects[0], Rect::new(0.0, 5.0, 10.0, 4.0));
        // mean tick
        assert_eq!(layers[3].rects[0], Rect::new(0.0, 7.0, 10.0, 1.0));
    }
}
