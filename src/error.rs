//! Error types for the generation pipeline.
//!
//! Errors are per-spec-file: one broken spec stops that file's generation
//! and the run controller decides the run-level policy (fail-fast).

use std::path::PathBuf;

/// Failure classes for one spec file's generate pipeline.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// The spec file itself could not be read. Always fatal: a spec must
    /// exist for the staleness comparison to mean anything.
    #[error("failed to read spec {path}: {source}")]
    SpecRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The spec file was read but is not a valid datatype description.
    #[error("failed to parse spec {path}: {reason}")]
    SpecParse { path: PathBuf, reason: String },

    /// A generated output could not be written.
    #[error("failed to write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An output file carries a duplicated provenance start marker.
    ///
    /// Files this tool produces contain exactly one provenance block, so
    /// hitting this means the generator itself misbehaved, not the user.
    #[error("malformed provenance in {path}: duplicated start marker")]
    MalformedProvenance { path: PathBuf },
}
