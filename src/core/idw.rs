//! Inverse-distance-weighted interpolation over a regular grid, with
//! neighbour search policies and optional barrier polylines.
use ndarray::Zip;
use tracing::debug;

use crate::core::params::IdwParams;
use crate::core::raster::{NODATA, Raster, cell_center};
use crate::error::{Error, Result};
use crate::types::{Extent, SearchRadius};

/// One measured point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A straight barrier segment. Samples are invisible across it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: (f64, f64),
    pub b: (f64, f64),
}

fn orientation(p: (f64, f64), q: (f64, f64), r: (f64, f64)) -> f64 {
    (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
}

fn on_segment(p: (f64, f64), q: (f64, f64), r: (f64, f64)) -> bool {
    r.0 >= p.0.min(q.0) && r.0 <= p.0.max(q.0) && r.1 >= p.1.min(q.1) && r.1 <= p.1.max(q.1)
}

/// True when segment `p1-p2` touches or crosses segment `q1-q2`.
pub fn segments_intersect(p1: (f64, f64), p2: (f64, f64), q1: (f64, f64), q2: (f64, f64)) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

fn visible(from: (f64, f64), to: (f64, f64), barriers: &[Segment]) -> bool {
    !barriers
        .iter()
        .any(|s| segments_intersect(from, to, s.a, s.b))
}

/// Keep the `n` closest entries of `(distance², z)` pairs.
fn keep_nearest(candidates: &mut Vec<(f64, f64)>, n: usize) {
    if candidates.len() > n {
        if n == 0 {
            candidates.clear();
            return;
        }
        candidates.select_nth_unstable_by(n - 1, |a, b| a.0.total_cmp(&b.0));
        candidates.truncate(n);
    }
}

/// Interpolated value at `(x, y)`, or None when no sample is usable.
pub fn estimate_at(
    x: f64,
    y: f64,
    samples: &[Sample],
    params: &IdwParams,
    barriers: &[Segment],
) -> Option<f64> {
    let mut candidates: Vec<(f64, f64)> = samples
        .iter()
        .filter(|s| barriers.is_empty() || visible((x, y), (s.x, s.y), barriers))
        .map(|s| {
            let dx = s.x - x;
            let dy = s.y - y;
            (dx * dx + dy * dy, s.z)
        })
        .collect();

    match params.search_radius {
        SearchRadius::Variable {
            count,
            max_distance,
        } => {
            if let Some(max) = max_distance {
                let max2 = max * max;
                candidates.retain(|c| c.0 <= max2);
            }
            keep_nearest(&mut candidates, count);
        }
        SearchRadius::Fixed {
            distance,
            min_count,
        } => {
            let d2 = distance * distance;
            let within = candidates.iter().filter(|c| c.0 <= d2).count();
            if within >= min_count {
                candidates.retain(|c| c.0 <= d2);
            } else {
                keep_nearest(&mut candidates, min_count);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    if let Some(hit) = candidates.iter().find(|c| c.0 <= f64::EPSILON) {
        return Some(hit.1);
    }

    let half_power = params.power / 2.0;
    let (num, den) = candidates.iter().fold((0.0, 0.0), |(num, den), &(d2, z)| {
        let w = 1.0 / d2.powf(half_power);
        (num + w * z, den + w)
    });
    Some(num / den)
}

/// Default cell size: the shorter side of the extent divided by 250.
pub fn default_cell_size(extent: &Extent) -> f64 {
    extent.width().min(extent.height()) / 250.0
}

/// Interpolate `samples` onto a grid covering `extent`.
pub fn interpolate(
    samples: &[Sample],
    extent: &Extent,
    cell_size: f64,
    params: &IdwParams,
    barriers: &[Segment],
    projection: &str,
) -> Result<Raster> {
    if !(cell_size > 0.0) || !cell_size.is_finite() {
        return Err(Error::InvalidArgument {
            arg: "cell_size",
            value: cell_size.to_string(),
        });
    }
    if params.power <= 0.0 {
        return Err(Error::InvalidArgument {
            arg: "power",
            value: params.power.to_string(),
        });
    }

    let mut raster = Raster::empty(extent, cell_size, projection);
    debug!(
        "IDW grid {}x{} cells of {} over {} from {} samples ({} barrier segments)",
        raster.cols(),
        raster.rows(),
        cell_size,
        extent,
        samples.len(),
        barriers.len()
    );

    let gt = raster.geotransform;
    Zip::indexed(&mut raster.data).par_for_each(|(row, col), cell| {
        let (x, y) = cell_center(&gt, row, col);
        *cell = match estimate_at(x, y, samples, params, barriers) {
            Some(v) => v as f32,
            None => NODATA,
        };
    });

    Ok(raster)
}
