//! idwgrid CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: normalise legacy flags, parse args,
//! dispatch to single-file or directory processing, and exit with the
//! appropriate status. For programmatic use, prefer `idwgrid::api`.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let argv = cli::args::normalize_legacy_flags(std::env::args_os());
    let args = cli::CliArgs::parse_from(argv);
    cli::run(args)
}
