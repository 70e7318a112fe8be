//! Resolution-based re-binning of dense tile records.
//!
//! Record layout is `[min, max, mean, std]` for whisker-capable data and
//! `[min, max]` for plain range data; fields past `record_size` read as NaN.

/// Summary statistics for one rendered bin (one group of source records).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinGroup {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}

/// Reduces `dense` into groups of `resolution` consecutive records.
///
/// - `min`/`max` are the true min/max of the group's first two fields.
/// - `mean` is the arithmetic mean of the group's mean fields.
/// - `std` passes the source std field through at `resolution == 1`; at
///   coarser resolutions it is recomputed as the population standard
///   deviation of the group's mean fields around the group mean. The source
///   std fields are discarded in that case. This re-derives spread from the
///   coarser mean series instead of pooling sub-bin variances and is kept
///   for compatibility with existing renders.
///
/// A trailing partial group (fewer than `resolution` records left) is
/// processed with however many records remain; no group is dropped.
pub fn aggregate(dense: &[f64], record_size: usize, resolution: usize) -> Vec<BinGroup> {
    if record_size == 0 || resolution == 0 {
        return Vec::new();
    }

    let record_count = dense.len() / record_size;
    let group_count = record_count.div_ceil(resolution);
    let mut groups = Vec::with_capacity(group_count);

    let field = |record: usize, idx: usize| -> f64 {
        if idx < record_size {
            dense[record * record_size + idx]
        } else {
            f64::NAN
        }
    };

    for g in 0..group_count {
        let start = g * resolution;
        let end = (start + resolution).min(record_count);
        let len = (end - start) as f64;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut mean_sum = 0.0;
        for r in start..end {
            min = min.min(field(r, 0));
            max = max.max(field(r, 1));
            mean_sum += field(r, 2);
        }
        let mean = mean_sum / len;

        let std = if resolution == 1 {
            field(start, 3)
        } else {
            let mut sq_sum = 0.0;
            for r in start..end {
                let delta = field(r, 2) - mean;
                sq_sum += delta * delta;
            }
            (sq_sum / len).sqrt()
        };

        groups.push(BinGroup {
            min,
            max,
            mean,
            std,
        });
    }

    groups
}
