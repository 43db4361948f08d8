//! High-level library API: interpolate one table, a directory of tables, or
//! mosaic the rasters already in `Output/`. Prefer these entrypoints over the
//! engine and core modules when integrating idwgrid.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::core::naming::{OutputName, group_for_mosaic};
use crate::core::params::Environment;
use crate::core::settings::Settings;
use crate::core::workspace::Workspace;
use crate::engine::{ExtensionLease, Geoprocessor, SPATIAL_EXTENSION};
use crate::error::{Error, Result};
use crate::io::InputTable;
use crate::io::table::{DEPTH_FIELD, EASTING_FIELD, NORTHING_FIELD, REQUIRED_FIELDS, SITE_FIELD};

pub mod report;

pub use report::{BatchReport, FileFailure, FileReport, RunReport, UnitOutcome, UnitStatus};

/// File extension of input tables.
pub const TABLE_EXT: &str = "csv";

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == ext)
}

/// Regular files in `dir` with extension `ext`, sorted by file name so runs
/// are reproducible regardless of platform directory order.
pub fn list_files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, ext) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Interpolate every column of `input` from `start_column` onward into
/// `<workspace>/Output/<site>_<variable>_<depth>cm.tif`.
///
/// Setup problems (unreadable table, missing columns, fewer than two rows,
/// missing projection or barrier file, stale scratch directory without
/// overwrite) are returned as `Err`. Per-column interpolation failures are
/// logged and recorded in the report; the remaining columns still run.
pub fn interpolate_file<G: Geoprocessor + ?Sized>(
    engine: &G,
    settings: &Settings,
    workspace: &Path,
    input: &Path,
    start_column: usize,
) -> Result<FileReport> {
    let ws = Workspace::new(workspace);
    let scratch = ws.prepare_scratch(settings.overwrite_output)?;

    let table = InputTable::from_path(input)?;
    table.require_columns(&REQUIRED_FIELDS)?;
    let site = table.representative(SITE_FIELD)?.to_string();
    let depth = table.representative(DEPTH_FIELD)?.to_string();

    let prj = ws.resolve(&settings.spatial_reference);
    if !prj.is_file() {
        return Err(Error::MissingInput(prj));
    }
    let spatial_ref = engine.load_spatial_reference(&prj)?;
    let layer = engine.make_xy_layer(&table, EASTING_FIELD, NORTHING_FIELD, &spatial_ref)?;
    if layer.skipped_rows > 0 {
        warn!(
            "{} row(s) in {:?} have no usable coordinates and were skipped",
            layer.skipped_rows, input
        );
    }

    let boundary = settings.sites.lookup(&site);
    let barrier = match boundary {
        Some(b) => {
            let path = ws.resolve(&b.barrier);
            if !path.exists() {
                return Err(Error::MissingInput(path));
            }
            debug!("Site '{}' uses barrier {:?} and extent {}", site, path, b.extent);
            Some(path)
        }
        None => {
            warn!(
                "Site '{}' has no boundary entry; interpolating without barrier or extent",
                site
            );
            None
        }
    };

    let mut env = Environment::new(workspace)
        .with_scratch(scratch)
        .with_extent(boundary.map(|b| b.extent));
    env.overwrite_output = settings.overwrite_output;
    env.cell_size = settings.cell_size;

    let columns = table.columns_from(start_column);
    if columns.is_empty() {
        warn!(
            "Start column {} is past the last column ({}); nothing to interpolate",
            start_column,
            table.column_count()
        );
    }

    let output_dir = ws.output_dir();
    let mut outcomes = Vec::with_capacity(columns.len());
    for column in columns {
        let name = OutputName::new(&site, column, &depth);
        let output = output_dir.join(name.file_name());

        info!("Processing {}...", name.variable);
        match engine.idw(
            &env,
            &layer,
            column,
            &output,
            &settings.idw,
            barrier.as_deref(),
        ) {
            Ok(()) => {
                info!("... Created file {:?}", output);
                outcomes.push(UnitOutcome::created(column.as_str(), output).with_name(name));
            }
            Err(e) => {
                error!("... Failed to create file: {}", e);
                outcomes.push(UnitOutcome::failed(column.as_str(), output, e).with_name(name));
            }
        }
    }

    Ok(FileReport {
        input: input.to_path_buf(),
        site,
        depth,
        boundary_applied: boundary.is_some(),
        outcomes,
    })
}

/// Mosaic the rasters created by `files` that share a variable and depth
/// into `<workspace>/Output/<variable>_<depth>cm.tif`.
///
/// Only rasters recorded as created in these reports take part, so mosaics
/// and per-site rasters left in `Output/` by earlier runs are never inputs.
/// Each group is attempted once; a failed group is logged, recorded and not
/// retried. Groups with a single member are left alone.
pub fn mosaic_outputs<G: Geoprocessor + ?Sized>(
    engine: &G,
    settings: &Settings,
    workspace: &Path,
    files: &[FileReport],
) -> Vec<UnitOutcome> {
    let ws = Workspace::new(workspace);
    let output_dir = ws.output_dir();
    let groups = group_for_mosaic(files.iter().flat_map(FileReport::created_rasters));
    info!(
        "Found {} generated files",
        groups.iter().map(|g| g.members.len()).sum::<usize>()
    );

    let mut env = Environment::new(workspace);
    env.overwrite_output = settings.overwrite_output;
    let scratch = ws.scratch_dir();
    if scratch.is_dir() {
        env = env.with_scratch(scratch);
    }

    let mut outcomes = Vec::new();
    for group in groups {
        if group.members.len() < 2 {
            debug!("Nothing to combine for {}", group.stripped_name);
            continue;
        }
        info!(
            "Combining files similar to: {:?}...",
            group.members.first().map(|p| p.as_path()).unwrap_or(Path::new(""))
        );
        let target = output_dir.join(&group.stripped_name);
        match engine.mosaic_to_new_raster(
            &env,
            &group.members,
            &output_dir,
            &group.stripped_name,
            &settings.mosaic,
        ) {
            Ok(path) => {
                info!("... Created file {}", group.stripped_name);
                outcomes.push(UnitOutcome::created(group.stripped_name, path));
            }
            Err(e) => {
                error!("... Failed to create file: {}", e);
                outcomes.push(UnitOutcome::failed(group.stripped_name, target, e));
            }
        }
    }
    outcomes
}

/// Interpolate every `.csv` in `input_dir`, then mosaic matching outputs.
///
/// A table that fails setup is recorded as a file failure and the batch
/// moves on. With no input tables nothing is interpolated or mosaicked.
pub fn interpolate_directory<G: Geoprocessor + ?Sized>(
    engine: &G,
    settings: &Settings,
    workspace: &Path,
    input_dir: &Path,
    start_column: usize,
) -> Result<BatchReport> {
    let tables = list_files_with_extension(input_dir, TABLE_EXT)?;
    info!("Found {} input files", tables.len());

    let mut report = BatchReport {
        files_found: tables.len(),
        ..BatchReport::default()
    };
    if tables.is_empty() {
        return Ok(report);
    }

    for table in &tables {
        info!("Processing file: {:?}", table);
        match interpolate_file(engine, settings, workspace, table, start_column) {
            Ok(file_report) => {
                info!(
                    "... Finished {:?}: {} created, {} failed",
                    table,
                    file_report.created(),
                    file_report.failed()
                );
                report.files.push(file_report);
            }
            Err(e) => {
                error!("... Failed to process {:?}: {}", table, e);
                report.file_failures.push(FileFailure {
                    input: table.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!("Finished interpolation, moving on to mosaic...");
    report.mosaics = mosaic_outputs(engine, settings, workspace, &report.files);
    Ok(report)
}

/// Run the whole workflow with the spatial extension checked out for its
/// duration. A regular file is interpolated on its own; anything else is
/// treated as a directory of tables.
pub fn run<G: Geoprocessor + ?Sized>(
    engine: &G,
    settings: &Settings,
    workspace: &Path,
    input: &Path,
    start_column: usize,
) -> Result<RunReport> {
    let _lease = ExtensionLease::acquire(engine, SPATIAL_EXTENSION)?;
    Workspace::new(workspace).check_output_dir();

    if input.is_file() {
        info!(
            "Input path is a file, assuming interpolation of a single file and not multiple files in a directory."
        );
        interpolate_file(engine, settings, workspace, input, start_column).map(RunReport::File)
    } else {
        info!(
            "Input path is a directory, assuming interpolation of all files in directory and mosaic similarly named files."
        );
        interpolate_directory(engine, settings, workspace, input, start_column)
            .map(RunReport::Batch)
    }
}
