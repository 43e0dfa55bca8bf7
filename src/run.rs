//! Top-level run loop: discover, generate, format.

use crate::config::ProjectConfig;
use crate::format::run_formatter;
use crate::generate::generate_files;
use crate::locate::find_spec_files;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// What one invocation did, for logging and assertions.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Spec files processed.
    pub specs: usize,
    /// Output paths actually rewritten, in processing order.
    pub written: Vec<PathBuf>,
}

/// Process every spec file (or an explicit subset) under the root.
///
/// Specs are handled strictly one at a time; the formatter runs once per
/// spec whose outputs changed, with exactly those paths. The run is
/// fail-fast: the first spec whose pipeline errors aborts the run, with
/// the offending path in the error chain. Specs are independent, so a
/// visible stop beats silent partial completion.
pub fn run(
    root: &Path,
    config: &ProjectConfig,
    force: bool,
    files: Option<Vec<PathBuf>>,
) -> Result<RunSummary> {
    let files = match files {
        Some(files) => files,
        None => find_spec_files(root, config)?,
    };

    info!(count = files.len(), "running dtgen on spec files");
    for file in &files {
        info!(spec = %file.display(), "queued");
    }

    let mut summary = RunSummary::default();
    for spec_path in &files {
        let generated = generate_files(root, config, spec_path, force)
            .with_context(|| format!("generate outputs for {}", spec_path.display()))?;
        if !generated.is_empty() {
            run_formatter(root, config, &generated)
                .with_context(|| format!("format outputs of {}", spec_path.display()))?;
        }
        summary.specs += 1;
        summary.written.extend(generated);
    }
    Ok(summary)
}
