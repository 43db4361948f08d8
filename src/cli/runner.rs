use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use idwgrid::api::{self, RunReport};
use idwgrid::core::settings::Settings;
use idwgrid::engine::GdalEngine;

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_settings(args: &CliArgs) -> Result<Settings, AppError> {
    let mut settings = match &args.config {
        Some(path) => {
            info!("Loading settings from {:?}", path);
            Settings::from_path(path)?
        }
        None => Settings::default(),
    };
    if let Some(method) = args.mosaic_method {
        settings.mosaic.method = method;
    }
    if args.no_overwrite {
        settings.overwrite_output = false;
    }
    Ok(settings)
}

fn write_report(path: &Path, report: &RunReport) -> Result<(), AppError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;
    info!("Report written to {:?}", path);
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    info!("Input dir: {:?}", args.input_path);
    info!("Start column: {}", args.start_col);
    info!("Working dir: {:?}", args.working_dir);

    let settings = load_settings(&args)?;
    let engine = GdalEngine::new();

    let report = api::run(
        &engine,
        &settings,
        &args.working_dir,
        &args.input_path,
        args.start_col,
    )
    .map_err(AppError::from)?;

    if let Some(path) = &args.report {
        write_report(path, &report)?;
    }

    info!("Created: {}", report.created());
    info!("Failed: {}", report.failed());
    info!("==== DONE ====");

    if args.strict && report.has_failures() {
        return Err(AppError::PartialFailure {
            failed: report.failed(),
        }
        .into());
    }
    Ok(())
}
