//! Output raster naming and the structured identity used to group rasters
//! for mosaicking.
//!
//! Per-file outputs are named `<site>_<variable>_<depth>cm.tif`; the mosaic
//! of one variable and depth is `<variable>_<depth>cm.tif` (the stripped
//! name). Grouping compares the `(variable, depth)` identity recorded when a
//! raster was created and never re-derives it from a file name.
use std::path::{Path, PathBuf};

use serde::Serialize;

pub const RASTER_EXT: &str = "tif";

fn strip_spaces(s: &str) -> String {
    s.chars().filter(|c| *c != ' ').collect()
}

/// Identity of one interpolated raster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OutputName {
    pub site: String,
    pub variable: String,
    pub depth: String,
}

impl OutputName {
    /// Build from raw table values; spaces are removed from site and variable.
    pub fn new(site: &str, variable: &str, depth: &str) -> Self {
        Self {
            site: strip_spaces(site),
            variable: strip_spaces(variable),
            depth: depth.to_string(),
        }
    }

    pub fn file_stem(&self) -> String {
        format!("{}_{}_{}cm", self.site, self.variable, self.depth)
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.file_stem(), RASTER_EXT)
    }

    /// The name with the leading site prefix removed.
    pub fn stripped_name(&self) -> String {
        format!("{}_{}cm.{}", self.variable, self.depth, RASTER_EXT)
    }

    fn same_layer(&self, other: &OutputName) -> bool {
        self.variable == other.variable && self.depth == other.depth
    }
}

/// Rasters of one variable and depth, in the order they were created.
#[derive(Debug, Clone, Serialize)]
pub struct MosaicGroup {
    pub variable: String,
    pub depth: String,
    pub stripped_name: String,
    pub members: Vec<PathBuf>,
}

/// Group created rasters by `(variable, depth)`, preserving first-appearance
/// order. A path listed twice (a later table overwrote an earlier output) is
/// kept once.
pub fn group_for_mosaic<'a, I>(rasters: I) -> Vec<MosaicGroup>
where
    I: IntoIterator<Item = (&'a OutputName, &'a Path)>,
{
    let mut groups: Vec<(OutputName, MosaicGroup)> = Vec::new();
    for (name, path) in rasters {
        match groups.iter_mut().find(|(key, _)| key.same_layer(name)) {
            Some((_, group)) => {
                if !group.members.iter().any(|m| m == path) {
                    group.members.push(path.to_path_buf());
                }
            }
            None => groups.push((
                name.clone(),
                MosaicGroup {
                    variable: name.variable.clone(),
                    depth: name.depth.clone(),
                    stripped_name: name.stripped_name(),
                    members: vec![path.to_path_buf()],
                },
            )),
        }
    }
    groups.into_iter().map(|(_, group)| group).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(site: &str, variable: &str, depth: &str) -> (OutputName, PathBuf) {
        let name = OutputName::new(site, variable, depth);
        let path = PathBuf::from("/ws/Output").join(name.file_name());
        (name, path)
    }

    fn group(rasters: &[(OutputName, PathBuf)]) -> Vec<MosaicGroup> {
        group_for_mosaic(rasters.iter().map(|(n, p)| (n, p.as_path())))
    }

    #[test]
    fn output_name_strips_spaces_and_keeps_depth_literal() {
        let name = OutputName::new("Cook East", "Soil Moisture", "30");
        assert_eq!(name.file_name(), "CookEast_SoilMoisture_30cm.tif");
        assert_eq!(name.stripped_name(), "SoilMoisture_30cm.tif");

        let float_depth = OutputName::new("Cook West", "pH", "30.0");
        assert_eq!(float_depth.file_name(), "CookWest_pH_30.0cm.tif");
    }

    #[test]
    fn same_variable_and_depth_group_together() {
        let rasters = [
            created("SiteA", "Temp", "10"),
            created("SiteA", "Moisture", "10"),
            created("SiteB", "Temp", "10"),
            created("SiteB", "Temp", "20"),
        ];
        let groups = group(&rasters);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].stripped_name, "Temp_10cm.tif");
        assert_eq!(
            groups[0].members,
            vec![rasters[0].1.clone(), rasters[2].1.clone()]
        );
        assert_eq!(groups[1].stripped_name, "Moisture_10cm.tif");
        assert_eq!(groups[2].depth, "20");
    }

    #[test]
    fn underscore_variables_keep_their_full_identity() {
        let rasters = [
            created("SiteA", "NH4_N", "30"),
            created("SiteA", "NO3_N", "30"),
            created("SiteB", "NH4_N", "30"),
            created("SiteB", "NO3_N", "30"),
        ];
        let groups = group(&rasters);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].variable, "NH4_N");
        assert_eq!(groups[0].stripped_name, "NH4_N_30cm.tif");
        assert_eq!(groups[1].variable, "NO3_N");
        assert!(groups.iter().all(|g| g.members.len() == 2));
    }

    #[test]
    fn substring_of_unrelated_name_does_not_over_group() {
        let rasters = [
            created("SiteA", "Temp", "10"),
            created("SiteB", "SoilTemp", "10"),
            created("SiteC", "Temp", "10"),
        ];
        let groups = group(&rasters);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].members.len(), 2);
        assert_eq!(groups[1].stripped_name, "SoilTemp_10cm.tif");
    }

    #[test]
    fn repeated_output_path_is_listed_once() {
        let rasters = [
            created("SiteA", "Temp", "10"),
            created("SiteA", "Temp", "10"),
            created("SiteB", "Temp", "10"),
        ];
        let groups = group(&rasters);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members.len(), 2);
    }
}
