//! External formatter invocation over freshly written outputs.

use crate::config::ProjectConfig;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Run the configured formatter in-place over a batch of generated files.
///
/// Called once per spec file whose outputs changed, with exactly the
/// changed paths. A formatter missing from PATH downgrades to a warning
/// so generation still works on machines without it; a formatter that
/// runs and exits non-zero fails the spec's pipeline.
pub fn run_formatter(root: &Path, config: &ProjectConfig, paths: &[PathBuf]) -> Result<()> {
    if paths.is_empty() {
        return Ok(());
    }

    let Ok(formatter) = which::which(&config.formatter) else {
        warn!(
            formatter = config.formatter.as_str(),
            "formatter not found, leaving outputs unformatted"
        );
        return Ok(());
    };

    debug!(
        formatter = %formatter.display(),
        count = paths.len(),
        "formatting generated files"
    );
    let status = Command::new(&formatter)
        .arg("-i")
        .args(paths)
        .current_dir(root)
        .status()
        .with_context(|| format!("run {}", formatter.display()))?;
    if !status.success() {
        bail!("formatter {} exited with {status}", formatter.display());
    }
    Ok(())
}
