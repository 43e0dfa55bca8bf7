//! Project configuration and output-path conventions.
//!
//! Configuration is read from `proj.toml` at the project root when present;
//! every field has a default so a bare tree still generates. The naming
//! helpers here are the single source of truth for how a header path maps
//! to its source path, include path, and include-guard macro.

use crate::hash::sha256_hex;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the optional per-project configuration file.
pub const CONFIG_FILE_NAME: &str = "proj.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Extension for generated headers, including the leading dot.
    #[serde(default = "default_header_extension")]
    pub header_extension: String,

    /// Extension for generated sources, including the leading dot.
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    /// Formatter binary invoked over freshly written outputs.
    #[serde(default = "default_formatter")]
    pub formatter: String,

    /// Subtrees (relative to the root) never scanned for spec files.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_header_extension() -> String {
    ".h".to_string()
}

fn default_source_extension() -> String {
    ".c".to_string()
}

fn default_formatter() -> String {
    "clang-format".to_string()
}

fn default_exclude() -> Vec<String> {
    vec!["deps".to_string(), "build".to_string(), "triton".to_string()]
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            header_extension: default_header_extension(),
            source_extension: default_source_extension(),
            formatter: default_formatter(),
            exclude: default_exclude(),
        }
    }
}

impl ProjectConfig {
    /// Load `proj.toml` from the root, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parse {}", path.display()))?;
        Ok(config)
    }
}

/// Derive the source path paired with a generated header.
///
/// `shapes/point.dtg.h` becomes `shapes/point.dtg.c` under the default
/// extensions; the directory never changes.
pub fn get_source_path(header_path: &Path, config: &ProjectConfig) -> PathBuf {
    let name = header_path.file_name().unwrap_or_default().to_string_lossy();
    let stem = name
        .strip_suffix(config.header_extension.as_str())
        .unwrap_or(&name);
    header_path.with_file_name(format!("{stem}{}", config.source_extension))
}

/// Project-relative include path for a header, with forward slashes.
pub fn get_include_path(header_path: &Path, root: &Path) -> String {
    let relative = header_path.strip_prefix(root).unwrap_or(header_path);
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}

/// Include-guard macro for a header path.
///
/// The sanitized relative path keeps the macro readable; the digest suffix
/// keeps two distinct relative paths from ever colliding after
/// sanitization (`a-b.h` and `a_b.h` sanitize identically).
pub fn gen_ifndef_uid(header_path: &Path, root: &Path) -> String {
    let relative = get_include_path(header_path, root);
    let sanitized: String = relative
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    let digest = sha256_hex(relative.as_bytes());
    format!("{sanitized}_{}", &digest[..8].to_ascii_uppercase())
}
