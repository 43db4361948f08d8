use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{failed} raster(s) failed; see log for details")]
    PartialFailure { failed: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Library(#[from] idwgrid::Error),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}
