#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use idwgrid::{
    Environment, Error, Geoprocessor, IdwParams, MosaicParams, PointLayer, Result,
    SpatialReference,
};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq)]
pub struct IdwCall {
    pub field: String,
    pub output: PathBuf,
    pub barrier: Option<PathBuf>,
    pub extent: Option<idwgrid::Extent>,
    pub power: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MosaicCall {
    pub inputs: Vec<PathBuf>,
    pub name: String,
}

/// Records every call; writes empty placeholder files so later passes can see them.
#[derive(Default)]
pub struct RecordingEngine {
    pub idw_calls: RefCell<Vec<IdwCall>>,
    pub mosaic_calls: RefCell<Vec<MosaicCall>>,
    pub checked_out: RefCell<HashSet<String>>,
    pub checkouts: RefCell<usize>,
    pub checkins: RefCell<usize>,
    pub failing_fields: Vec<String>,
    pub failing_mosaics: Vec<String>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_field(mut self, field: &str) -> Self {
        self.failing_fields.push(field.to_string());
        self
    }

    pub fn failing_mosaic(mut self, name: &str) -> Self {
        self.failing_mosaics.push(name.to_string());
        self
    }

    pub fn idw_outputs(&self) -> Vec<String> {
        self.idw_calls
            .borrow()
            .iter()
            .map(|c| c.output.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }
}

impl Geoprocessor for RecordingEngine {
    fn check_out_extension(&self, name: &str) -> Result<()> {
        *self.checkouts.borrow_mut() += 1;
        if !self.checked_out.borrow_mut().insert(name.to_string()) {
            return Err(Error::ExtensionUnavailable(name.to_string()));
        }
        Ok(())
    }

    fn check_in_extension(&self, name: &str) -> Result<()> {
        *self.checkins.borrow_mut() += 1;
        if self.checked_out.borrow_mut().remove(name) {
            Ok(())
        } else {
            Err(Error::ExtensionNotCheckedOut(name.to_string()))
        }
    }

    fn load_spatial_reference(&self, prj: &Path) -> Result<SpatialReference> {
        Ok(SpatialReference {
            wkt: fs::read_to_string(prj)?,
            source: Some(prj.to_path_buf()),
        })
    }

    fn idw(
        &self,
        env: &Environment,
        _layer: &PointLayer,
        z_field: &str,
        output: &Path,
        params: &IdwParams,
        barrier: Option<&Path>,
    ) -> Result<()> {
        self.idw_calls.borrow_mut().push(IdwCall {
            field: z_field.to_string(),
            output: output.to_path_buf(),
            barrier: barrier.map(Path::to_path_buf),
            extent: env.extent,
            power: params.power,
        });
        if self.failing_fields.iter().any(|f| f == z_field) {
            return Err(Error::NoSamples {
                field: z_field.to_string(),
            });
        }
        fs::write(output, b"")?;
        Ok(())
    }

    fn mosaic_to_new_raster(
        &self,
        _env: &Environment,
        inputs: &[PathBuf],
        output_dir: &Path,
        name: &str,
        _params: &MosaicParams,
    ) -> Result<PathBuf> {
        self.mosaic_calls.borrow_mut().push(MosaicCall {
            inputs: inputs.to_vec(),
            name: name.to_string(),
        });
        if self.failing_mosaics.iter().any(|m| m == name) {
            return Err(Error::Processing(format!("cannot mosaic {}", name)));
        }
        let out = output_dir.join(name);
        fs::write(&out, b"")?;
        Ok(out)
    }
}

/// Workspace with the projection file, both barrier files and `Output/`.
pub fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("Input/Boundaries")).unwrap();
    fs::create_dir_all(root.join("Output")).unwrap();
    fs::write(root.join("Input/32611.prj"), "PROJCS[\"test\"]").unwrap();
    fs::write(
        root.join("Input/Boundaries/CookEastDUwS_Conservative_line.shp"),
        b"",
    )
    .unwrap();
    fs::write(root.join("Input/Boundaries/CWcatchment_line.shp"), b"").unwrap();
    dir
}

pub const HEADER: &str = "SITE,DEPTH_CM,EASTING,NORTHING";

/// Write a table with `variables` columns after the four required ones.
pub fn write_table(dir: &Path, file: &str, site: &str, depth: &str, variables: &[&str]) -> PathBuf {
    let mut content = String::from(HEADER);
    for v in variables {
        content.push(',');
        content.push_str(v);
    }
    content.push('\n');
    for (i, (e, n)) in [(493400.0, 5180700.0), (493500.0, 5180800.0), (493600.0, 5180900.0)]
        .iter()
        .enumerate()
    {
        content.push_str(&format!("{},{},{},{}", site, depth, e, n));
        for j in 0..variables.len() {
            content.push_str(&format!(",{}", (i + j) as f64 * 0.5));
        }
        content.push('\n');
    }
    let path = dir.join(file);
    fs::write(&path, content).unwrap();
    path
}
