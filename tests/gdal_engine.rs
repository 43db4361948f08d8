//! End-to-end checks of the GDAL-backed engine. These need a GDAL runtime
//! with the GTiff driver.
mod common;

use std::fs;

use common::write_table;
use idwgrid::io::gdal::{read_barrier_segments, read_raster};
use idwgrid::{
    BoundaryTable, Extent, ExtensionLease, GdalEngine, SPATIAL_EXTENSION, Settings, SiteBoundary,
    UnitStatus, interpolate_file, mosaic_outputs,
};

const UTM_11N_PRJ: &str = r#"PROJCS["WGS_1984_UTM_Zone_11N",GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],PROJECTION["Transverse_Mercator"],PARAMETER["False_Easting",500000.0],PARAMETER["False_Northing",0.0],PARAMETER["Central_Meridian",-117.0],PARAMETER["Scale_Factor",0.9996],PARAMETER["Latitude_Of_Origin",0.0],UNIT["Meter",1.0]]"#;

fn gdal_workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Input")).unwrap();
    fs::create_dir_all(dir.path().join("Output")).unwrap();
    fs::write(dir.path().join("Input/32611.prj"), UTM_11N_PRJ).unwrap();
    dir
}

fn settings() -> Settings {
    Settings {
        cell_size: Some(20.0),
        ..Settings::default()
    }
}

#[test]
fn interpolates_and_mosaics_geotiffs() {
    let ws = gdal_workspace();
    let a = write_table(ws.path(), "a.csv", "North Plot", "10", &["Temp"]);
    let b = write_table(ws.path(), "b.csv", "South Plot", "10", &["Temp"]);
    let engine = GdalEngine::new();
    let _lease = ExtensionLease::acquire(&engine, SPATIAL_EXTENSION).unwrap();

    let ra = interpolate_file(&engine, &settings(), ws.path(), &a, 4).unwrap();
    let rb = interpolate_file(&engine, &settings(), ws.path(), &b, 4).unwrap();
    assert_eq!(ra.outcomes[0].status, UnitStatus::Created);
    assert_eq!(rb.outcomes[0].status, UnitStatus::Created);

    let out = ws.path().join("Output/NorthPlot_Temp_10cm.tif");
    let raster = read_raster(&out).unwrap();
    // samples span 200 x 200 map units
    assert_eq!((raster.rows(), raster.cols()), (10, 10));
    assert_eq!(raster.cell_width(), 20.0);
    assert!(raster.projection.contains("UTM") || raster.projection.contains("Transverse"));
    assert_eq!(raster.valid_count(), 100);
    let (min, max) = raster
        .data
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    assert!(min >= 0.0 && max <= 1.0);

    let mosaics = mosaic_outputs(&engine, &settings(), ws.path(), &[ra, rb]);
    assert_eq!(mosaics.len(), 1);
    assert!(mosaics[0].is_created());
    let combined = read_raster(ws.path().join("Output/Temp_10cm.tif")).unwrap();
    assert_eq!((combined.rows(), combined.cols()), (10, 10));
    assert_eq!(combined.valid_count(), 100);
}

#[test]
fn idw_fails_per_column_without_checkout() {
    let ws = gdal_workspace();
    let table = write_table(ws.path(), "a.csv", "North Plot", "10", &["Temp"]);
    let engine = GdalEngine::new();

    let report = interpolate_file(&engine, &settings(), ws.path(), &table, 4).unwrap();
    assert_eq!(report.failed(), 1);
    assert!(!ws.path().join("Output/NorthPlot_Temp_10cm.tif").exists());
}

#[test]
fn non_numeric_column_fails_without_stopping_others() {
    let ws = gdal_workspace();
    let path = ws.path().join("mixed.csv");
    fs::write(
        &path,
        "SITE,DEPTH_CM,EASTING,NORTHING,Notes,Temp\n\
         Plot,5,0,0,dry,1.0\n\
         Plot,5,100,0,wet,2.0\n\
         Plot,5,0,100,dry,3.0\n",
    )
    .unwrap();
    let engine = GdalEngine::new();
    let _lease = ExtensionLease::acquire(&engine, SPATIAL_EXTENSION).unwrap();

    let report = interpolate_file(&engine, &settings(), ws.path(), &path, 4).unwrap();
    assert_eq!(report.outcomes.len(), 2);
    assert!(!report.outcomes[0].is_created());
    assert!(report.outcomes[1].is_created());
    assert!(ws.path().join("Output/Plot_Temp_5cm.tif").exists());
}

/// A straight wall at x = 40 plus a multi-line far outside the grid.
const WALL_GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "properties": {},
      "geometry": { "type": "LineString", "coordinates": [[40, -1000], [40, 1000]] } },
    { "type": "Feature", "properties": {},
      "geometry": { "type": "MultiLineString",
                    "coordinates": [[[500, 500], [600, 600]], [[700, 700], [800, 800], [900, 700]]] } }
  ]
}"#;

fn walled_plot(ws: &std::path::Path) -> (Settings, std::path::PathBuf) {
    fs::create_dir_all(ws.join("Input/Boundaries")).unwrap();
    fs::write(ws.join("Input/Boundaries/wall.geojson"), WALL_GEOJSON).unwrap();
    let table = ws.join("walled.csv");
    fs::write(
        &table,
        "SITE,DEPTH_CM,EASTING,NORTHING,Temp\n\
         Walled Plot,10,10,10,1.0\n\
         Walled Plot,10,10,90,1.0\n\
         Walled Plot,10,90,10,9.0\n\
         Walled Plot,10,90,90,9.0\n",
    )
    .unwrap();
    let settings = Settings {
        sites: BoundaryTable::new(vec![SiteBoundary {
            site: "Walled Plot".into(),
            barrier: "Input/Boundaries/wall.geojson".into(),
            extent: Extent::new(0.0, 0.0, 100.0, 100.0).unwrap(),
        }]),
        ..settings()
    };
    (settings, table)
}

#[test]
fn barrier_lines_are_read_from_every_geometry_part() {
    let ws = gdal_workspace();
    walled_plot(ws.path());
    let segments = read_barrier_segments(ws.path().join("Input/Boundaries/wall.geojson")).unwrap();
    // one from the line, one plus two from the multi-line parts
    assert_eq!(segments.len(), 4);
    assert_eq!(segments[0].a, (40.0, -1000.0));
    assert_eq!(segments[0].b, (40.0, 1000.0));
}

#[test]
fn cells_only_see_samples_on_their_side_of_the_barrier() {
    let ws = gdal_workspace();
    let (settings, table) = walled_plot(ws.path());
    let engine = GdalEngine::new();
    let _lease = ExtensionLease::acquire(&engine, SPATIAL_EXTENSION).unwrap();

    let report = interpolate_file(&engine, &settings, ws.path(), &table, 4).unwrap();
    assert!(report.boundary_applied);
    assert_eq!(report.created(), 1);

    let raster = read_raster(ws.path().join("Output/WalledPlot_Temp_10cm.tif")).unwrap();
    assert_eq!((raster.rows(), raster.cols()), (5, 5));
    assert_eq!(raster.valid_count(), 25);
    for row in 0..raster.rows() {
        for col in 0..raster.cols() {
            let (x, _) = raster.cell_center(row, col);
            let expected = if x < 40.0 { 1.0 } else { 9.0 };
            assert!(
                (raster.data[[row, col]] - expected).abs() < 1e-6,
                "cell ({}, {}) at x={} = {}",
                row,
                col,
                x,
                raster.data[[row, col]]
            );
        }
    }
}

#[cfg(unix)]
#[test]
fn staged_outputs_are_world_readable() {
    use std::os::unix::fs::PermissionsExt;

    let ws = gdal_workspace();
    let table = write_table(ws.path(), "a.csv", "North Plot", "10", &["Temp"]);
    let engine = GdalEngine::new();
    let _lease = ExtensionLease::acquire(&engine, SPATIAL_EXTENSION).unwrap();

    interpolate_file(&engine, &settings(), ws.path(), &table, 4).unwrap();

    let meta = fs::metadata(ws.path().join("Output/NorthPlot_Temp_10cm.tif")).unwrap();
    assert_eq!(
        meta.permissions().mode() & 0o777,
        idwgrid::engine::gdal_engine::OUTPUT_MODE
    );
}
