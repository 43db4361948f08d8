//! In-memory single-band float raster with a north-up geotransform.
use ndarray::Array2;

use crate::types::Extent;

/// Nodata marker written to every Float32 output.
pub const NODATA: f32 = f32::MIN;

#[derive(Debug, Clone)]
pub struct Raster {
    /// Shape (rows, cols)
    pub data: Array2<f32>,
    /// Affine geotransform ([origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height])
    pub geotransform: [f64; 6],
    /// Projection in WKT format, empty when unknown
    pub projection: String,
    pub nodata: f32,
}

impl Raster {
    /// Nodata-filled grid covering `extent`, anchored at its upper-left corner.
    pub fn empty(extent: &Extent, cell_size: f64, projection: &str) -> Self {
        let cols = ((extent.width() / cell_size).ceil() as usize).max(1);
        let rows = ((extent.height() / cell_size).ceil() as usize).max(1);
        Self {
            data: Array2::from_elem((rows, cols), NODATA),
            geotransform: [extent.xmin, cell_size, 0.0, extent.ymax, 0.0, -cell_size],
            projection: projection.to_string(),
            nodata: NODATA,
        }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn cell_width(&self) -> f64 {
        self.geotransform[1]
    }

    pub fn cell_height(&self) -> f64 {
        self.geotransform[5].abs()
    }

    pub fn extent(&self) -> Extent {
        let gt = &self.geotransform;
        Extent {
            xmin: gt[0],
            ymin: gt[3] - self.rows() as f64 * self.cell_height(),
            xmax: gt[0] + self.cols() as f64 * self.cell_width(),
            ymax: gt[3],
        }
    }

    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        cell_center(&self.geotransform, row, col)
    }

    /// Cell containing map coordinate `(x, y)`.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let col = ((x - self.geotransform[0]) / self.cell_width()).floor();
        let row = ((self.geotransform[3] - y) / self.cell_height()).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        Some((row, col))
    }

    /// Value at map coordinate `(x, y)`; None outside the grid or on nodata.
    pub fn value_at(&self, x: f64, y: f64) -> Option<f32> {
        let (row, col) = self.cell_at(x, y)?;
        let v = self.data[[row, col]];
        if self.is_nodata(v) { None } else { Some(v) }
    }

    pub fn is_nodata(&self, v: f32) -> bool {
        v.is_nan() || v == self.nodata
    }

    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|v| !self.is_nodata(**v)).count()
    }
}

pub fn cell_center(gt: &[f64; 6], row: usize, col: usize) -> (f64, f64) {
    (
        gt[0] + (col as f64 + 0.5) * gt[1],
        gt[3] + (row as f64 + 0.5) * gt[5],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_covers_extent_with_ceil_dimensions() {
        let ext = Extent::new(0.0, 0.0, 10.0, 5.0).unwrap();
        let r = Raster::empty(&ext, 3.0, "");
        assert_eq!(r.cols(), 4);
        assert_eq!(r.rows(), 2);
        assert_eq!(r.cell_center(0, 0), (1.5, 3.5));
        assert_eq!(r.valid_count(), 0);
    }

    #[test]
    fn lookup_by_coordinate() {
        let ext = Extent::new(100.0, 200.0, 104.0, 204.0).unwrap();
        let mut r = Raster::empty(&ext, 1.0, "");
        r.data[[0, 3]] = 7.0;
        assert_eq!(r.cell_at(103.5, 203.5), Some((0, 3)));
        assert_eq!(r.value_at(103.5, 203.5), Some(7.0));
        assert_eq!(r.value_at(100.5, 200.5), None);
        assert_eq!(r.value_at(99.0, 201.0), None);
        assert_eq!(r.value_at(101.0, 205.0), None);
    }
}
