//! Geoprocessing engine seam.
//!
//! Orchestration code only talks to [`Geoprocessor`]: spatial reference
//! loading, point layer construction, IDW interpolation, mosaic-to-new-raster
//! and licensed extension checkout/checkin. [`GdalEngine`] is the shipped
//! implementation; tests substitute recording fakes.
use std::path::{Path, PathBuf};

use crate::core::idw::Sample;
use crate::core::params::{Environment, IdwParams, MosaicParams};
use crate::error::{Error, Result};
use crate::io::InputTable;
use crate::types::Extent;

pub mod gdal_engine;
pub mod lease;

pub use gdal_engine::GdalEngine;
pub use lease::ExtensionLease;

/// Extension required for interpolation.
pub const SPATIAL_EXTENSION: &str = "spatial";

/// Coordinate system definition, as WKT.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialReference {
    pub wkt: String,
    pub source: Option<PathBuf>,
}

/// Point features built from a table's coordinate columns.
#[derive(Debug, Clone)]
pub struct PointLayer {
    pub source: PathBuf,
    pub spatial_ref: SpatialReference,
    pub fields: Vec<String>,
    pub coords: Vec<(f64, f64)>,
    /// Attribute rows aligned with `coords`
    pub records: Vec<Vec<String>>,
    /// Rows dropped because a coordinate was missing or not numeric
    pub skipped_rows: usize,
}

impl PointLayer {
    pub fn from_table(
        table: &InputTable,
        x_field: &str,
        y_field: &str,
        spatial_ref: &SpatialReference,
    ) -> Result<Self> {
        table.require_columns(&[x_field, y_field])?;
        let xi = table.column_index(x_field).unwrap_or_default();
        let yi = table.column_index(y_field).unwrap_or_default();

        let mut coords = Vec::with_capacity(table.row_count());
        let mut records = Vec::with_capacity(table.row_count());
        let mut skipped_rows = 0;
        for record in &table.records {
            let x = record.get(xi).and_then(|v| v.trim().parse::<f64>().ok());
            let y = record.get(yi).and_then(|v| v.trim().parse::<f64>().ok());
            match (x, y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {
                    coords.push((x, y));
                    records.push(record.clone());
                }
                _ => skipped_rows += 1,
            }
        }

        Ok(Self {
            source: table.path.clone(),
            spatial_ref: spatial_ref.clone(),
            fields: table.headers.clone(),
            coords,
            records,
            skipped_rows,
        })
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn extent(&self) -> Option<Extent> {
        Extent::from_points(self.coords.iter().copied())
    }

    /// Numeric samples of `field`; empty and non-numeric values are left out.
    pub fn samples(&self, field: &str) -> Result<Vec<Sample>> {
        let idx = self
            .fields
            .iter()
            .position(|f| f == field)
            .ok_or_else(|| Error::MissingColumns {
                path: self.source.clone(),
                columns: field.to_string(),
            })?;
        Ok(self
            .coords
            .iter()
            .zip(&self.records)
            .filter_map(|(&(x, y), record)| {
                let z = record.get(idx)?.trim().parse::<f64>().ok()?;
                z.is_finite().then_some(Sample { x, y, z })
            })
            .collect())
    }
}

/// The external geoprocessing capability the batch workflow drives.
pub trait Geoprocessor {
    fn check_out_extension(&self, name: &str) -> Result<()>;

    fn check_in_extension(&self, name: &str) -> Result<()>;

    fn load_spatial_reference(&self, prj: &Path) -> Result<SpatialReference>;

    fn make_xy_layer(
        &self,
        table: &InputTable,
        x_field: &str,
        y_field: &str,
        spatial_ref: &SpatialReference,
    ) -> Result<PointLayer> {
        PointLayer::from_table(table, x_field, y_field, spatial_ref)
    }

    /// Interpolate `z_field` of `layer` and write the surface to `output`.
    /// `barrier` is an optional polyline dataset samples cannot be seen across.
    fn idw(
        &self,
        env: &Environment,
        layer: &PointLayer,
        z_field: &str,
        output: &Path,
        params: &IdwParams,
        barrier: Option<&Path>,
    ) -> Result<()>;

    /// Combine `inputs` into a new raster `output_dir/name`, returning its path.
    fn mosaic_to_new_raster(
        &self,
        env: &Environment,
        inputs: &[PathBuf],
        output_dir: &Path,
        name: &str,
        params: &MosaicParams,
    ) -> Result<PathBuf>;
}
