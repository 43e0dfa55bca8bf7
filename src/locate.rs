//! Discovery of spec files under a project root.

use crate::config::ProjectConfig;
use crate::spec::SpecKind;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walk the root and collect every recognized spec file outside the
/// excluded subtrees.
///
/// Exclusion is component-wise path containment (`Path::starts_with`), so
/// `build/` prunes `build/shapes/point.struct.toml` but never
/// `build-notes/point.struct.toml`. Order follows filesystem traversal and
/// only affects log readability.
pub fn find_spec_files(root: &Path, config: &ProjectConfig) -> Result<Vec<PathBuf>> {
    let excluded: Vec<PathBuf> = config.exclude.iter().map(|name| root.join(name)).collect();

    let mut found = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry.path(), &excluded));
    for entry in walker {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        if entry.file_type().is_file() && SpecKind::from_path(entry.path()).is_some() {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

fn is_excluded(path: &Path, excluded: &[PathBuf]) -> bool {
    excluded.iter().any(|subtree| path.starts_with(subtree))
}
