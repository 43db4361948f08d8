//! Site boundary policy: maps a site identifier to the barrier polyline and
//! processing extent used when interpolating that site's samples.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::Extent;

/// Barrier and extent for one named site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteBoundary {
    pub site: String,
    /// Barrier polyline shapefile, relative to the workspace unless absolute
    pub barrier: PathBuf,
    pub extent: Extent,
}

/// Closed lookup table of known sites, matched by exact string comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundaryTable {
    sites: Vec<SiteBoundary>,
}

impl BoundaryTable {
    pub fn new(sites: Vec<SiteBoundary>) -> Self {
        Self { sites }
    }

    /// The two field sites the tool was built for.
    pub fn builtin() -> Self {
        Self::new(vec![
            SiteBoundary {
                site: "Cook East".to_string(),
                barrier: PathBuf::from("Input/Boundaries/CookEastDUwS_Conservative_line.shp"),
                extent: Extent {
                    xmin: 493370.923667054,
                    ymin: 5180613.73134777,
                    xmax: 493976.389445712,
                    ymax: 5180995.70484399,
                },
            },
            SiteBoundary {
                site: "Cook West".to_string(),
                barrier: PathBuf::from("Input/Boundaries/CWcatchment_line.shp"),
                extent: Extent {
                    xmin: 492842.2706117,
                    ymin: 5180831.8982194,
                    xmax: 493350.270611698,
                    ymax: 5181287.89821941,
                },
            },
        ])
    }

    /// Unknown sites return None: no barrier and no extent restriction.
    pub fn lookup(&self, site: &str) -> Option<&SiteBoundary> {
        self.sites.iter().find(|s| s.site == site)
    }
}

impl Default for BoundaryTable {
    fn default() -> Self {
        Self::builtin()
    }
}
