//! Typed datatype specs and suffix-based dispatch.
//!
//! A spec file's kind comes from its double suffix (`.struct.toml`,
//! `.enum.toml`, `.variant.toml`). Loading produces a closed [`Spec`]
//! enum, so rendering dispatch is an exhaustive match and adding a kind
//! is a compile-time-checked change.

use crate::error::GenError;
use serde::Deserialize;
use std::path::Path;

/// Recognized spec-file double suffixes, in dispatch order.
pub const SPEC_SUFFIXES: [(&str, SpecKind); 3] = [
    (".struct.toml", SpecKind::Struct),
    (".enum.toml", SpecKind::Enum),
    (".variant.toml", SpecKind::Variant),
];

/// Which datatype family a spec file describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecKind {
    Struct,
    Enum,
    Variant,
}

impl SpecKind {
    /// Determine the kind from a path's double suffix, if recognized.
    pub fn from_path(path: &Path) -> Option<SpecKind> {
        let name = path.file_name()?.to_str()?;
        SPEC_SUFFIXES
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix) && name.len() > suffix.len())
            .map(|(_, kind)| *kind)
    }
}

/// One field of a struct or one payload arm of a variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A plain C struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructSpec {
    pub name: String,
    #[serde(default)]
    pub includes: Vec<String>,
    pub fields: Vec<FieldSpec>,
}

/// A C enum with named values.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumSpec {
    pub name: String,
    #[serde(default)]
    pub includes: Vec<String>,
    pub values: Vec<String>,
}

/// A tagged union: a tag enum plus one payload per variant.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantSpec {
    pub name: String,
    #[serde(default)]
    pub includes: Vec<String>,
    pub variants: Vec<FieldSpec>,
}

/// A loaded spec, tagged by kind.
#[derive(Debug, Clone)]
pub enum Spec {
    Struct(StructSpec),
    Enum(EnumSpec),
    Variant(VariantSpec),
}

/// Load and parse a spec file into its typed representation.
///
/// The locator only yields recognized suffixes, so an unrecognized path
/// here is an internal invariant violation, not a user error.
pub fn load_spec(path: &Path) -> Result<Spec, GenError> {
    let kind = SpecKind::from_path(path).unwrap_or_else(|| {
        panic!("unrecognized spec suffix: {}", path.display());
    });

    let content = std::fs::read_to_string(path).map_err(|source| GenError::SpecRead {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |err: toml::de::Error| GenError::SpecParse {
        path: path.to_path_buf(),
        reason: err.message().to_string(),
    };

    let spec = match kind {
        SpecKind::Struct => Spec::Struct(toml::from_str(&content).map_err(parse_error)?),
        SpecKind::Enum => Spec::Enum(toml::from_str(&content).map_err(parse_error)?),
        SpecKind::Variant => Spec::Variant(toml::from_str(&content).map_err(parse_error)?),
    };
    Ok(spec)
}
