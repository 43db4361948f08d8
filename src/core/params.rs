use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{ColormapMode, Extent, MosaicMethod, PixelType, SearchRadius};

/// Per-operation geoprocessing environment, passed explicitly to every engine call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub workspace: PathBuf,
    /// Replace existing outputs (and a stale scratch directory) instead of failing
    pub overwrite_output: bool,
    /// Directory for intermediate files; outputs are staged here before being moved into place
    pub scratch_workspace: Option<PathBuf>,
    /// Output extent; None means the extent of the inputs
    pub extent: Option<Extent>,
    /// Output cell size in map units; None derives it from the extent
    pub cell_size: Option<f64>,
}

impl Environment {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            overwrite_output: true,
            scratch_workspace: None,
            extent: None,
            cell_size: None,
        }
    }

    pub fn with_extent(mut self, extent: Option<Extent>) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_scratch(mut self, scratch: impl Into<PathBuf>) -> Self {
        self.scratch_workspace = Some(scratch.into());
        self
    }
}

/// IDW parameters suitable for settings files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdwParams {
    pub power: f64,
    pub search_radius: SearchRadius,
    /// Overrides the environment cell size when set
    pub cell_size: Option<f64>,
}

impl Default for IdwParams {
    fn default() -> Self {
        Self {
            power: 2.0,
            search_radius: SearchRadius::default(),
            cell_size: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MosaicParams {
    pub pixel_type: PixelType,
    pub band_count: usize,
    pub method: MosaicMethod,
    pub colormap: ColormapMode,
}

impl Default for MosaicParams {
    fn default() -> Self {
        Self {
            pixel_type: PixelType::Float32,
            band_count: 1,
            method: MosaicMethod::Last,
            colormap: ColormapMode::First,
        }
    }
}
