use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod error;
mod format;
mod generate;
mod hash;
mod locate;
mod provenance;
mod render;
mod run;
mod spec;

use cli::RootArgs;
use config::ProjectConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = RootArgs::parse();
    let root = args
        .root
        .canonicalize()
        .with_context(|| format!("resolve project root {}", args.root.display()))?;
    let config = ProjectConfig::load(&root)?;

    let files = if args.files.is_empty() {
        None
    } else {
        Some(args.files)
    };
    let summary = run::run(&root, &config, args.force, files)?;

    if summary.written.is_empty() {
        println!("All outputs up to date ({} specs).", summary.specs);
    } else {
        println!(
            "Wrote {} files from {} specs.",
            summary.written.len(),
            summary.specs
        );
    }
    Ok(())
}
