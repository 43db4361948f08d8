//! Working directory layout: `Input/`, `Input/Boundaries/`, the projection
//! file, `Output/` and the `temp` scratch directory.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const OUTPUT_DIR: &str = "Output";
pub const SCRATCH_DIR: &str = "temp";

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.root.join(SCRATCH_DIR)
    }

    /// Resolve a path from settings against the workspace root; absolute paths pass through.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            self.root.join(relative)
        }
    }

    /// Create the scratch directory. An existing one is recreated when
    /// `overwrite` is set and rejected otherwise.
    pub fn prepare_scratch(&self, overwrite: bool) -> Result<PathBuf> {
        let scratch = self.scratch_dir();
        if scratch.exists() {
            if !overwrite {
                return Err(Error::ScratchExists(scratch));
            }
            debug!("Recreating scratch directory {:?}", scratch);
            fs::remove_dir_all(&scratch)?;
        }
        fs::create_dir(&scratch)?;
        Ok(scratch)
    }

    /// Warn early when `Output/` is missing; every write will fail without it.
    pub fn check_output_dir(&self) -> bool {
        let out = self.output_dir();
        if out.is_dir() {
            true
        } else {
            warn!("Output directory {:?} does not exist; outputs cannot be written", out);
            false
        }
    }
}
