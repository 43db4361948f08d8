//! I/O layer: CSV input tables, GDAL-backed raster/vector/projection readers,
//! and `writers` for Float32 GeoTIFF output and metadata embedding.
pub mod table;
pub use self::table::InputTable;

pub mod gdal;
pub use self::gdal::GdalError;

pub mod writers;
