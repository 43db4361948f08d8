use gdal::Dataset;
use gdal::DriverManager;
use gdal::raster::{Buffer, ColorInterpretation};
use std::path::Path;

use crate::core::raster::Raster;
use crate::io::gdal::GdalError;

/// Write a single-band Float32 GeoTIFF with geotransform, projection and nodata set.
pub fn write_tiff_f32(output: &Path, raster: &Raster) -> Result<Dataset, GdalError> {
    let (rows, cols) = raster.data.dim();
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut ds = driver.create_with_band_type::<f32, _>(output, cols, rows, 1)?;
    ds.set_geo_transform(&raster.geotransform)?;
    if !raster.projection.is_empty() {
        ds.set_projection(&raster.projection)?;
    }

    {
        let mut band = ds.rasterband(1)?;
        band.set_color_interpretation(ColorInterpretation::GrayIndex)?;
        band.set_no_data_value(Some(raster.nodata as f64))?;
        let values: Vec<f32> = raster.data.iter().copied().collect();
        let mut buf = Buffer::new((cols, rows), values);
        band.write((0, 0), (cols, rows), &mut buf)?;
    }
    Ok(ds)
}
