//! CLI argument parsing for the generator.

use clap::Parser;
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "dtgen",
    version,
    about = "Incremental datatype header/source generator",
    after_help = "Examples:\n  dtgen --root .\n  dtgen --root . --force\n  dtgen shapes/point.struct.toml"
)]
pub struct RootArgs {
    /// Project root scanned for spec files (and holding proj.toml, if any)
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Regenerate all outputs even when provenance hashes match
    #[arg(long)]
    pub force: bool,

    /// Explicit spec files to process instead of scanning the root
    #[arg(value_name = "SPEC")]
    pub files: Vec<PathBuf>,
}
