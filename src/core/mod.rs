//! Core building blocks: workspace layout, run settings, the site boundary
//! table, output naming and mosaic grouping, and the IDW and mosaic
//! algorithms over in-memory rasters. These are consumed by the engine and
//! the high-level `api` module.
pub mod boundary;
pub mod idw;
pub mod mosaic;
pub mod naming;
pub mod params;
pub mod raster;
pub mod settings;
pub mod workspace;
