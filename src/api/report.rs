//! Per-unit outcome collections returned by the batch entry points, so
//! callers can detect partial failure without scraping logs.
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::naming::OutputName;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UnitStatus {
    Created,
    Failed { reason: String },
}

/// Result of one interpolation (per column) or one mosaic (per group).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitOutcome {
    pub unit: String,
    pub output: PathBuf,
    /// Identity of an interpolated raster; mosaics leave it unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<OutputName>,
    #[serde(flatten)]
    pub status: UnitStatus,
}

impl UnitOutcome {
    pub fn created(unit: impl Into<String>, output: PathBuf) -> Self {
        Self {
            unit: unit.into(),
            output,
            name: None,
            status: UnitStatus::Created,
        }
    }

    pub fn failed(unit: impl Into<String>, output: PathBuf, reason: impl std::fmt::Display) -> Self {
        Self {
            unit: unit.into(),
            output,
            name: None,
            status: UnitStatus::Failed {
                reason: reason.to_string(),
            },
        }
    }

    pub fn with_name(mut self, name: OutputName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn is_created(&self) -> bool {
        self.status == UnitStatus::Created
    }
}

fn count(outcomes: &[UnitOutcome], created: bool) -> usize {
    outcomes.iter().filter(|o| o.is_created() == created).count()
}

/// Interpolation results for one input table.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub site: String,
    pub depth: String,
    /// False when the site had no entry in the boundary table
    pub boundary_applied: bool,
    pub outcomes: Vec<UnitOutcome>,
}

impl FileReport {
    pub fn created(&self) -> usize {
        count(&self.outcomes, true)
    }

    pub fn failed(&self) -> usize {
        count(&self.outcomes, false)
    }

    /// Rasters this table produced, with the identity they were created under.
    pub fn created_rasters(&self) -> impl Iterator<Item = (&OutputName, &Path)> {
        self.outcomes
            .iter()
            .filter(|o| o.is_created())
            .filter_map(|o| o.name.as_ref().map(|n| (n, o.output.as_path())))
    }
}

/// A table that could not be processed at all (setup error).
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub input: PathBuf,
    pub reason: String,
}

/// Directory batch processing report
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub files_found: usize,
    pub files: Vec<FileReport>,
    pub file_failures: Vec<FileFailure>,
    pub mosaics: Vec<UnitOutcome>,
}

impl BatchReport {
    /// Rasters written, per-file and mosaicked.
    pub fn created(&self) -> usize {
        self.files.iter().map(FileReport::created).sum::<usize>() + count(&self.mosaics, true)
    }

    pub fn failed(&self) -> usize {
        self.files.iter().map(FileReport::failed).sum::<usize>()
            + count(&self.mosaics, false)
            + self.file_failures.len()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// Outcome of a whole CLI run.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RunReport {
    File(FileReport),
    Batch(BatchReport),
}

impl RunReport {
    pub fn created(&self) -> usize {
        match self {
            RunReport::File(r) => r.created(),
            RunReport::Batch(r) => r.created(),
        }
    }

    pub fn failed(&self) -> usize {
        match self {
            RunReport::File(r) => r.failed(),
            RunReport::Batch(r) => r.failed(),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_counts_include_setup_failures_and_mosaics() {
        let file = FileReport {
            input: "a.csv".into(),
            site: "Cook East".into(),
            depth: "30".into(),
            boundary_applied: true,
            outcomes: vec![
                UnitOutcome::created("Temp", "A_Temp_30cm.tif".into()),
                UnitOutcome::failed("pH", "A_pH_30cm.tif".into(), "no samples"),
            ],
        };
        let report = BatchReport {
            files_found: 2,
            files: vec![file],
            file_failures: vec![FileFailure {
                input: "b.csv".into(),
                reason: "missing columns".into(),
            }],
            mosaics: vec![UnitOutcome::created("Temp_30cm.tif", "Temp_30cm.tif".into())],
        };
        assert_eq!(report.created(), 2);
        assert_eq!(report.failed(), 2);
        assert!(report.has_failures());
        assert!(!BatchReport::default().has_failures());
    }

    #[test]
    fn file_report_lists_only_created_rasters() {
        let temp = OutputName::new("SiteA", "Temp", "30");
        let ph = OutputName::new("SiteA", "pH", "30");
        let file = FileReport {
            input: "a.csv".into(),
            site: "SiteA".into(),
            depth: "30".into(),
            boundary_applied: false,
            outcomes: vec![
                UnitOutcome::created("Temp", "SiteA_Temp_30cm.tif".into()).with_name(temp.clone()),
                UnitOutcome::failed("pH", "SiteA_pH_30cm.tif".into(), "no samples").with_name(ph),
            ],
        };
        let rasters: Vec<_> = file.created_rasters().collect();
        assert_eq!(rasters, vec![(&temp, Path::new("SiteA_Temp_30cm.tif"))]);
    }

    #[test]
    fn outcome_serializes_flat_status() {
        let o = UnitOutcome::failed("pH", "x.tif".into(), "boom");
        let v = serde_json::to_value(&o).unwrap();
        assert_eq!(v["status"], "failed");
        assert_eq!(v["reason"], "boom");
        assert_eq!(v["unit"], "pH");
    }
}
