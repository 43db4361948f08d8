//! Run settings loaded from an optional JSON file. Every field falls back to
//! the built-in default, so an empty object `{}` is a valid settings file.
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::boundary::BoundaryTable;
use crate::core::params::{IdwParams, MosaicParams};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sites: BoundaryTable,
    /// Projection file for the input coordinates, relative to the workspace
    pub spatial_reference: PathBuf,
    pub idw: IdwParams,
    pub mosaic: MosaicParams,
    /// Default output cell size in map units
    pub cell_size: Option<f64>,
    /// Replace existing outputs and a stale scratch directory
    pub overwrite_output: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sites: BoundaryTable::builtin(),
            spatial_reference: PathBuf::from("Input/32611.prj"),
            idw: IdwParams::default(),
            mosaic: MosaicParams::default(),
            cell_size: None,
            overwrite_output: true,
        }
    }
}

impl Settings {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
