//! Shared types and enums used across idwgrid.
//! Includes `SearchRadius`, `MosaicMethod`, `ColormapMode`, `PixelType` and
//! the processing `Extent`.
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Neighbour selection policy for IDW.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchRadius {
    /// Use the `count` nearest samples, optionally ignoring samples beyond `max_distance`.
    Variable {
        count: usize,
        max_distance: Option<f64>,
    },
    /// Use every sample within `distance`; fall back to the `min_count` nearest if too few.
    Fixed { distance: f64, min_count: usize },
}

impl Default for SearchRadius {
    fn default() -> Self {
        SearchRadius::Variable {
            count: 12,
            max_distance: None,
        }
    }
}

impl std::fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchRadius::Variable {
                count,
                max_distance: None,
            } => write!(f, "VARIABLE {}", count),
            SearchRadius::Variable {
                count,
                max_distance: Some(d),
            } => write!(f, "VARIABLE {} {}", count, d),
            SearchRadius::Fixed {
                distance,
                min_count,
            } => write!(f, "FIXED {} {}", distance, min_count),
        }
    }
}

/// How overlapping cells are resolved when mosaicking.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MosaicMethod {
    First,
    Last,
    Minimum,
    Maximum,
    Mean,
}

impl std::fmt::Display for MosaicMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MosaicMethod::First => write!(f, "FIRST"),
            MosaicMethod::Last => write!(f, "LAST"),
            MosaicMethod::Minimum => write!(f, "MINIMUM"),
            MosaicMethod::Maximum => write!(f, "MAXIMUM"),
            MosaicMethod::Mean => write!(f, "MEAN"),
        }
    }
}

/// Which input's colour table the mosaic output inherits.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColormapMode {
    First,
    Last,
    Ignore,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelType {
    Float32,
}

impl std::fmt::Display for PixelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelType::Float32 => write!(f, "32_BIT_FLOAT"),
        }
    }
}

/// Rectangular processing extent in map units.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Extent {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self, Error> {
        if !(xmin < xmax && ymin < ymax) {
            return Err(Error::InvalidExtent(format!(
                "{} {} {} {}",
                xmin, ymin, xmax, ymax
            )));
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Smallest extent enclosing both.
    pub fn union(&self, other: &Extent) -> Extent {
        Extent {
            xmin: self.xmin.min(other.xmin),
            ymin: self.ymin.min(other.ymin),
            xmax: self.xmax.max(other.xmax),
            ymax: self.ymax.max(other.ymax),
        }
    }

    /// Bounding box of a set of coordinates. Degenerate boxes are padded by half a unit.
    pub fn from_points<I>(points: I) -> Option<Extent>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let (x0, y0) = iter.next()?;
        let mut ext = Extent {
            xmin: x0,
            ymin: y0,
            xmax: x0,
            ymax: y0,
        };
        for (x, y) in iter {
            ext.xmin = ext.xmin.min(x);
            ext.ymin = ext.ymin.min(y);
            ext.xmax = ext.xmax.max(x);
            ext.ymax = ext.ymax.max(y);
        }
        if ext.width() <= 0.0 {
            ext.xmin -= 0.5;
            ext.xmax += 0.5;
        }
        if ext.height() <= 0.0 {
            ext.ymin -= 0.5;
            ext.ymax += 0.5;
        }
        Some(ext)
    }
}

/// Parses the space separated `"xmin ymin xmax ymax"` form.
impl FromStr for Extent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(|v| v.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidExtent(s.to_string()))?;
        match values.as_slice() {
            [xmin, ymin, xmax, ymax] => Extent::new(*xmin, *ymin, *xmax, *ymax),
            _ => Err(Error::InvalidExtent(s.to_string())),
        }
    }
}

impl std::fmt::Display for Extent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.xmin, self.ymin, self.xmax, self.ymax)
    }
}
