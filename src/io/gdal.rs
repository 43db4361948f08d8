use std::path::Path;

use gdal::spatial_ref::SpatialRef;
use gdal::vector::{Geometry, LayerAccess};
use gdal::{Dataset, errors::GdalError as GdalCrateError};
use ndarray::Array2;
use thiserror::Error;

use crate::core::idw::Segment;
use crate::core::raster::{NODATA, Raster};

/// Errors encountered when reading or writing through GDAL
#[derive(Debug, Error)]
pub enum GdalError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] GdalCrateError),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Dimension mismatch: expected {0}x{1}, got {2} values")]
    DimensionMismatch(usize, usize, usize),
}

/// Read band 1 of a raster as Float32. The band's nodata value (if any) is
/// normalised to the crate-wide nodata marker.
pub fn read_raster<P: AsRef<Path>>(path: P) -> Result<Raster, GdalError> {
    let dataset = Dataset::open(path.as_ref())?;
    let (size_x, size_y) = dataset.raster_size();
    if dataset.raster_count() == 0 {
        return Err(GdalError::UnsupportedFormat("No raster bands found".into()));
    }
    let geotransform = dataset.geo_transform()?;
    if geotransform[2] != 0.0 || geotransform[4] != 0.0 {
        return Err(GdalError::UnsupportedFormat(
            "Rotated geotransforms are not supported".into(),
        ));
    }
    let projection = dataset.projection();

    let band = dataset.rasterband(1)?;
    let source_nodata = band.no_data_value();
    let buf = band.read_as::<f32>((0, 0), (size_x, size_y), (size_x, size_y), None)?;
    let data_vec = buf.data().to_vec();
    let len = data_vec.len();
    let mut data = Array2::from_shape_vec((size_y, size_x), data_vec)
        .map_err(|_| GdalError::DimensionMismatch(size_x, size_y, len))?;

    if let Some(nd) = source_nodata.map(|v| v as f32) {
        if nd != NODATA {
            data.mapv_inplace(|v| if v == nd { NODATA } else { v });
        }
    }

    Ok(Raster {
        data,
        geotransform,
        projection,
        nodata: NODATA,
    })
}

/// Lines contribute their vertex pairs; collections and polygons recurse into their parts.
fn collect_segments(geometry: &Geometry, out: &mut Vec<Segment>) {
    if geometry.point_count() > 0 {
        let mut points = Vec::new();
        geometry.get_points(&mut points);
        for pair in points.windows(2) {
            out.push(Segment {
                a: (pair[0].0, pair[0].1),
                b: (pair[1].0, pair[1].1),
            });
        }
        return;
    }
    for i in 0..geometry.geometry_count() {
        collect_segments(&geometry.get_geometry(i), out);
    }
}

/// Read every line (or polygon ring) of the first layer as straight barrier segments.
pub fn read_barrier_segments<P: AsRef<Path>>(path: P) -> Result<Vec<Segment>, GdalError> {
    let dataset = Dataset::open(path.as_ref())?;
    let mut layer = dataset.layer(0)?;
    let mut segments = Vec::new();
    for feature in layer.features() {
        if let Some(geometry) = feature.geometry() {
            collect_segments(geometry, &mut segments);
        }
    }
    Ok(segments)
}

/// Parse a `.prj` file (ESRI or OGC WKT) and return normalised WKT.
pub fn read_projection_file<P: AsRef<Path>>(path: P) -> Result<String, crate::error::Error> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let srs = SpatialRef::from_definition(text.trim()).map_err(GdalError::from)?;
    Ok(srs.to_wkt().map_err(GdalError::from)?)
}
