#![doc = r#"
idwgrid: batch IDW interpolation of point samples into GeoTIFF surfaces.

This crate turns CSV tables of field measurements (one site and one sampling
depth per table, projected `EASTING`/`NORTHING` coordinates and any number of
variable columns) into inverse-distance-weighted Float32 GeoTIFFs, one per
variable, and then mosaics rasters of the same variable and depth produced
from different tables. It powers the `idwgrid` CLI and can be embedded in
your own Rust applications.

Requirements
------------
- GDAL development headers and runtime available on your system.
- Rust 2024 edition toolchain.

Working directory layout
------------------------
```text
<workdir>/
  Input/32611.prj             projection of the input coordinates
  Input/Boundaries/*.shp      barrier polylines per site
  Output/                     must exist; rasters are written here
  temp/                       scratch, recreated on every run
```

Quick start: one table
----------------------
```rust,no_run
use std::path::Path;
use idwgrid::{interpolate_file, GdalEngine, Settings, SPATIAL_EXTENSION, ExtensionLease};

fn main() -> idwgrid::Result<()> {
    let engine = GdalEngine::new();
    let _lease = ExtensionLease::acquire(&engine, SPATIAL_EXTENSION)?;

    let report = interpolate_file(
        &engine,
        &Settings::default(),
        Path::new("/data/work"),
        Path::new("/data/work/Input/CookEast_30cm.csv"),
        4, // first variable column
    )?;

    println!("created={} failed={}", report.created(), report.failed());
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use idwgrid::{run, GdalEngine, Settings};

fn main() -> idwgrid::Result<()> {
    let engine = GdalEngine::new();
    // Checks the spatial extension out for the whole run, interpolates every
    // table in the directory, then mosaics matching outputs.
    let report = run(
        &engine,
        &Settings::default(),
        Path::new("/data/work"),
        Path::new("/data/work/Input/Samples"),
        4,
    )?;

    if report.has_failures() {
        eprintln!("{} raster(s) failed", report.failed());
    }
    Ok(())
}
```

Error handling
--------------
Setup problems are returned as `idwgrid::Error`; per-raster failures are
recorded in the returned reports instead of aborting the batch.

```rust,no_run
use std::path::Path;
use idwgrid::{interpolate_file, Error, GdalEngine, Settings};

fn main() {
    let engine = GdalEngine::new();
    match interpolate_file(&engine, &Settings::default(), Path::new("/w"), Path::new("/w/a.csv"), 4) {
        Ok(report) => println!("{} created", report.created()),
        Err(Error::MissingColumns { columns, .. }) => eprintln!("missing: {columns}"),
        Err(Error::TableTooShort { rows, .. }) => eprintln!("only {rows} row(s)"),
        Err(other) => eprintln!("setup error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`]: high-level entry points and reports.
- [`engine`]: the `Geoprocessor` trait, `GdalEngine` and the extension lease.
- [`core`]: settings, boundary table, naming, IDW and mosaic algorithms.
- [`io`]: CSV tables and GDAL readers/writers.
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod engine;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::boundary::{BoundaryTable, SiteBoundary};
pub use crate::core::naming::{MosaicGroup, OutputName};
pub use crate::core::params::{Environment, IdwParams, MosaicParams};
pub use crate::core::settings::Settings;
pub use error::{Error, Result};
pub use types::{ColormapMode, Extent, MosaicMethod, PixelType, SearchRadius};

// Engine
pub use engine::{
    ExtensionLease, GdalEngine, Geoprocessor, PointLayer, SPATIAL_EXTENSION, SpatialReference,
};

// Readers
pub use io::{GdalError, InputTable};

// High-level API re-exports
pub use api::{
    BatchReport, FileFailure, FileReport, RunReport, UnitOutcome, UnitStatus,
    interpolate_directory, interpolate_file, mosaic_outputs, run,
};
