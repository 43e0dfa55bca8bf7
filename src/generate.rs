//! Staleness decisions and per-spec generation.
//!
//! One spec file maps to one header/source pair. The recorded provenance
//! hash inside an existing output is the only staleness state; a missing
//! output, or one whose provenance cannot be recovered, is always
//! rewritten. Writes go through a temp file and rename so an interrupted
//! run leaves either the old file or a complete new one.

use crate::config::{self, ProjectConfig};
use crate::error::GenError;
use crate::hash::hash_file;
use crate::provenance::{existing_hash, render_disclaimer, render_provenance};
use crate::render::{render_header, render_source};
use crate::spec::{load_spec, Spec, SPEC_SUFFIXES};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header and source paths derived from one spec file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPair {
    pub header: PathBuf,
    pub source: PathBuf,
}

/// Derive the output pair for a spec path.
///
/// `shapes/point.struct.toml` becomes `shapes/point.dtg.h` and
/// `shapes/point.dtg.c` under the default extensions.
pub fn output_pair(spec_path: &Path, config: &ProjectConfig) -> OutputPair {
    let name = spec_path.file_name().unwrap_or_default().to_string_lossy();
    let stem = SPEC_SUFFIXES
        .iter()
        .find_map(|(suffix, _)| name.strip_suffix(suffix))
        .unwrap_or(&name);
    let header = spec_path.with_file_name(format!("{stem}.dtg{}", config.header_extension));
    let source = config::get_source_path(&header, config);
    OutputPair { header, source }
}

/// Does the existing output's recorded hash differ from the spec's current
/// hash?
///
/// A missing output answers `false`: there is no prior record to compare.
/// The orchestrator separately treats a missing output as "write it", so
/// this predicate stays a pure comparison. An existing output without a
/// recoverable record answers `true`.
pub fn needs_generate(spec_path: &Path, out: &Path) -> Result<bool, GenError> {
    if !out.is_file() {
        return Ok(false);
    }
    let current = hash_file(spec_path)?;
    let prior = existing_hash(out)?;
    debug!(
        out = %out.display(),
        prior = prior.as_deref().unwrap_or("<none>"),
        current = current.as_str(),
        "hash comparison"
    );
    Ok(prior.as_deref() != Some(current.as_str()))
}

fn should_write(force: bool, spec_path: &Path, out: &Path) -> Result<bool, GenError> {
    Ok(force || !out.is_file() || needs_generate(spec_path, out)?)
}

/// Generate the output pair for one spec file, returning the paths
/// actually rewritten (empty when fully up to date).
pub fn generate_files(
    root: &Path,
    config: &ProjectConfig,
    spec_path: &Path,
    force: bool,
) -> Result<Vec<PathBuf>, GenError> {
    let spec = load_spec(spec_path)?;
    let spec_hash = hash_file(spec_path)?;
    let pair = output_pair(spec_path, config);
    let spec_rel = spec_path.strip_prefix(root).unwrap_or(spec_path);

    let mut written = Vec::new();
    if generate_header(&spec, spec_path, spec_rel, &spec_hash, root, &pair.header, force)? {
        written.push(pair.header.clone());
    }
    if generate_source(&spec, spec_path, spec_rel, &spec_hash, root, &pair, force)? {
        written.push(pair.source.clone());
    }
    Ok(written)
}

fn generate_header(
    spec: &Spec,
    spec_path: &Path,
    spec_rel: &Path,
    spec_hash: &str,
    root: &Path,
    out: &Path,
    force: bool,
) -> Result<bool, GenError> {
    if !should_write(force, spec_path, out)? {
        info!(
            spec = %spec_rel.display(),
            out = %display_relative(out, root),
            "no generation needed"
        );
        return Ok(false);
    }
    info!(
        spec = %spec_rel.display(),
        out = %display_relative(out, root),
        "regenerating"
    );

    let guard = config::gen_ifndef_uid(out, root);
    let mut text = String::new();
    render_disclaimer(spec_rel, &mut text);
    render_provenance(spec_hash, &mut text);
    text.push('\n');
    text.push_str(&format!("#ifndef {guard}\n"));
    text.push_str(&format!("#define {guard}\n"));
    text.push('\n');
    render_header(spec, &mut text);
    text.push('\n');
    text.push_str(&format!("#endif // {guard}\n"));

    write_output(out, &text)?;
    Ok(true)
}

fn generate_source(
    spec: &Spec,
    spec_path: &Path,
    spec_rel: &Path,
    spec_hash: &str,
    root: &Path,
    pair: &OutputPair,
    force: bool,
) -> Result<bool, GenError> {
    let out = pair.source.as_path();
    if !should_write(force, spec_path, out)? {
        info!(
            spec = %spec_rel.display(),
            out = %display_relative(out, root),
            "no generation needed"
        );
        return Ok(false);
    }
    info!(
        spec = %spec_rel.display(),
        out = %display_relative(out, root),
        "regenerating"
    );

    let include = config::get_include_path(&pair.header, root);
    let mut text = String::new();
    render_disclaimer(spec_rel, &mut text);
    render_provenance(spec_hash, &mut text);
    text.push('\n');
    text.push_str(&format!("#include \"{include}\"\n"));
    text.push('\n');
    render_source(spec, &mut text);

    write_output(out, &text)?;
    Ok(true)
}

/// Write through a temp file in the destination directory, then rename,
/// so a crash never leaves a half-written file under the final name.
fn write_output(out: &Path, text: &str) -> Result<(), GenError> {
    let map_err = |source: std::io::Error| GenError::OutputWrite {
        path: out.to_path_buf(),
        source,
    };

    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent).map_err(map_err)?;
    }
    let file_name = out
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("generated");
    let tmp_path = out
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!(".{file_name}.tmp"));
    std::fs::write(&tmp_path, text).map_err(map_err)?;
    std::fs::rename(&tmp_path, out).map_err(map_err)?;
    Ok(())
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
