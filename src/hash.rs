//! Content hashing for spec files.
//!
//! Hashes raw on-disk bytes, never a parsed form, so any byte-level edit
//! to a spec is visible to the staleness check.

use crate::error::GenError;
use sha2::Digest;
use std::path::Path;

/// Compute the lowercase hex SHA-256 of a file's exact contents.
pub fn hash_file(path: &Path) -> Result<String, GenError> {
    let bytes = std::fs::read(path).map_err(|source| GenError::SpecRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(sha256_hex(&bytes))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = sha2::Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
