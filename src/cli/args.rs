use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use idwgrid::types::MosaicMethod;

#[derive(Parser, Debug)]
#[command(
    name = "idwgrid",
    version,
    about = "Interpolate CSV point samples into IDW rasters and mosaic matching outputs"
)]
pub struct CliArgs {
    /// Path to a file or directory with spatial data (in csv format) to be interpolated
    #[arg(short = 'i', long = "inputpath")]
    pub input_path: PathBuf,

    /// Index of the first column to interpolate; it and every column to its right are used
    #[arg(short = 'c', long = "startcol")]
    pub start_col: usize,

    /// Working directory; a "temp" directory is created and an "Output" directory is assumed.
    /// The legacy spelling `-wd` is accepted too.
    #[arg(short = 'w', long = "workingdir")]
    pub working_dir: PathBuf,

    /// Optional JSON settings file (site boundaries, IDW and mosaic parameters)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Mosaic overlap resolution (overrides the settings file)
    #[arg(long, value_enum)]
    pub mosaic_method: Option<MosaicMethod>,

    /// Fail instead of replacing existing outputs or a stale scratch directory
    #[arg(long, default_value_t = false)]
    pub no_overwrite: bool,

    /// Write a JSON report of every created and failed raster to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Exit with an error when any raster failed
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

/// Rewrite the two-letter `-wd` flag, which clap cannot express as a short
/// option, into `--workingdir`.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::<OsString>::into)
        .map(|arg| {
            let rewritten = match arg.to_str() {
                Some("-wd") => Some(OsString::from("--workingdir")),
                Some(s) => s
                    .strip_prefix("-wd=")
                    .map(|value| OsString::from(format!("--workingdir={}", value))),
                None => None,
            };
            rewritten.unwrap_or(arg)
        })
        .collect()
}
