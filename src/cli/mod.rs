//! Command Line Interface (CLI) layer for idwgrid.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-file and directory
//! runs. It wires user-provided options to the library functionality
//! exposed via `idwgrid::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
