use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};

use crate::core::idw::{default_cell_size, interpolate};
use crate::core::mosaic::composite;
use crate::core::params::{Environment, IdwParams, MosaicParams};
use crate::core::raster::Raster;
use crate::engine::{Geoprocessor, PointLayer, SPATIAL_EXTENSION, SpatialReference};
use crate::error::{Error, Result};
use crate::io::gdal::{read_barrier_segments, read_projection_file, read_raster};
use crate::io::writers::metadata::{RasterProvenance, embed_tiff_metadata};
use crate::io::writers::tiff::write_tiff_f32;

const KNOWN_EXTENSIONS: &[&str] = &[SPATIAL_EXTENSION];

/// Permission bits of rasters moved out of the scratch workspace.
#[cfg(unix)]
pub const OUTPUT_MODE: u32 = 0o644;

/// Geoprocessor backed by GDAL for raster, vector and projection I/O, with
/// IDW and mosaic compositing computed in-process.
#[derive(Debug, Default)]
pub struct GdalEngine {
    checked_out: Mutex<HashSet<String>>,
}

impl GdalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn extensions(&self) -> MutexGuard<'_, HashSet<String>> {
        self.checked_out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_checked_out(&self, name: &str) -> bool {
        self.extensions().contains(name)
    }

    fn ensure_writable(env: &Environment, output: &Path) -> Result<()> {
        if output.exists() && !env.overwrite_output {
            return Err(Error::OutputExists(output.to_path_buf()));
        }
        Ok(())
    }

    /// Write `raster` to `output`, staging it in the scratch workspace when one is configured.
    fn write_output(
        env: &Environment,
        output: &Path,
        raster: &Raster,
        provenance: &RasterProvenance,
    ) -> Result<()> {
        debug!(
            "Writing {} raster {:?}",
            provenance.get("OPERATION").unwrap_or("unknown"),
            output
        );
        match env.scratch_workspace.as_deref().filter(|d| d.is_dir()) {
            Some(scratch) => {
                let staged = tempfile::Builder::new()
                    .prefix("idwgrid-")
                    .suffix(".tif")
                    .tempfile_in(scratch)?
                    .into_temp_path();
                {
                    let mut ds = write_tiff_f32(&staged, raster)?;
                    embed_tiff_metadata(&mut ds, provenance)?;
                }
                // Temp files are created owner-only; outputs get regular file permissions.
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    std::fs::set_permissions(&staged, std::fs::Permissions::from_mode(OUTPUT_MODE))?;
                }
                debug!("Moving staged raster {:?} -> {:?}", staged, output);
                staged.persist(output).map_err(|e| Error::Io(e.error))?;
            }
            None => {
                let mut ds = write_tiff_f32(output, raster)?;
                embed_tiff_metadata(&mut ds, provenance)?;
            }
        }
        Ok(())
    }
}

impl Geoprocessor for GdalEngine {
    fn check_out_extension(&self, name: &str) -> Result<()> {
        if !KNOWN_EXTENSIONS.contains(&name) {
            return Err(Error::ExtensionUnavailable(name.to_string()));
        }
        if !self.extensions().insert(name.to_string()) {
            // Not re-entrant: a second checkout while held is refused.
            return Err(Error::ExtensionUnavailable(name.to_string()));
        }
        Ok(())
    }

    fn check_in_extension(&self, name: &str) -> Result<()> {
        if self.extensions().remove(name) {
            Ok(())
        } else {
            Err(Error::ExtensionNotCheckedOut(name.to_string()))
        }
    }

    fn load_spatial_reference(&self, prj: &Path) -> Result<SpatialReference> {
        let wkt = read_projection_file(prj)?;
        Ok(SpatialReference {
            wkt,
            source: Some(prj.to_path_buf()),
        })
    }

    fn idw(
        &self,
        env: &Environment,
        layer: &PointLayer,
        z_field: &str,
        output: &Path,
        params: &IdwParams,
        barrier: Option<&Path>,
    ) -> Result<()> {
        if !self.is_checked_out(SPATIAL_EXTENSION) {
            return Err(Error::ExtensionNotCheckedOut(SPATIAL_EXTENSION.to_string()));
        }
        Self::ensure_writable(env, output)?;

        let samples = layer.samples(z_field)?;
        if samples.is_empty() {
            return Err(Error::NoSamples {
                field: z_field.to_string(),
            });
        }

        let extent = match env.extent {
            Some(ext) => ext,
            None => layer.extent().ok_or_else(|| Error::NoSamples {
                field: z_field.to_string(),
            })?,
        };
        let cell_size = params
            .cell_size
            .or(env.cell_size)
            .unwrap_or_else(|| default_cell_size(&extent));

        let barriers = match barrier {
            Some(path) => read_barrier_segments(path)?,
            None => Vec::new(),
        };

        let raster = interpolate(
            &samples,
            &extent,
            cell_size,
            params,
            &barriers,
            &layer.spatial_ref.wkt,
        )?;
        info!(
            "IDW {}: {} samples, {}x{} cells, {} valid",
            z_field,
            samples.len(),
            raster.cols(),
            raster.rows(),
            raster.valid_count()
        );

        let mut provenance = RasterProvenance::new("IDW");
        provenance
            .insert("SOURCE_TABLE", &layer.source.display().to_string())
            .insert("VARIABLE", z_field)
            .insert("IDW_POWER", &params.power.to_string())
            .insert("SEARCH_RADIUS", &params.search_radius.to_string())
            .insert("SAMPLE_COUNT", &samples.len().to_string());
        if let Some(path) = barrier {
            provenance.insert("BARRIER", &path.display().to_string());
        }

        Self::write_output(env, output, &raster, &provenance)
    }

    fn mosaic_to_new_raster(
        &self,
        env: &Environment,
        inputs: &[PathBuf],
        output_dir: &Path,
        name: &str,
        params: &MosaicParams,
    ) -> Result<PathBuf> {
        if params.band_count != 1 {
            return Err(Error::InvalidArgument {
                arg: "band_count",
                value: params.band_count.to_string(),
            });
        }
        let output = output_dir.join(name);
        Self::ensure_writable(env, &output)?;

        let rasters = inputs
            .iter()
            .map(read_raster)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mosaic = composite(&rasters, params.method)?;

        let mut provenance = RasterProvenance::new("MOSAIC");
        provenance
            .insert("MOSAIC_METHOD", &params.method.to_string())
            .insert("PIXEL_TYPE", &params.pixel_type.to_string())
            .insert("COLORMAP_MODE", &format!("{:?}", params.colormap).to_uppercase())
            .insert("INPUT_COUNT", &inputs.len().to_string());

        Self::write_output(env, &output, &mosaic, &provenance)?;
        Ok(output)
    }
}
