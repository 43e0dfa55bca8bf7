//! Provenance blocks embedded in generated files.
//!
//! Each generated file opens with a disclaimer and a `/* proj-data */`
//! comment holding the hash of the spec it was generated from. The block is
//! the only staleness state the tool keeps: outputs double as the cache, so
//! they stay self-contained and diff-friendly. Rendering is byte-stable
//! (sorted keys, fixed 2-space indent) so identical inputs reproduce
//! identical files.

use crate::error::GenError;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::path::Path;

/// Opening line of the provenance comment.
pub const PROVENANCE_START: &str = "/* proj-data";

/// Closing line of the provenance comment.
pub const PROVENANCE_END: &str = "*/";

/// Metadata recorded in every generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    /// Lowercase hex hash of the spec file content at generation time.
    pub generated_from: String,
}

/// Append the do-not-edit disclaimer pointing back at the spec.
pub fn render_disclaimer(spec_rel: &Path, out: &mut String) {
    out.push_str("// THIS FILE WAS AUTO-GENERATED BY dtgen. DO NOT MODIFY IT!\n");
    out.push_str("// If you would like to modify this datatype, instead modify\n");
    out.push_str(&format!("// {}\n", spec_rel.display()));
}

/// Append the provenance comment for a spec hash.
pub fn render_provenance(spec_hash: &str, out: &mut String) {
    let record = ProvenanceRecord {
        generated_from: spec_hash.to_string(),
    };
    // to_string_pretty uses 2-space indentation; the record has a single
    // field so key order is fixed by construction.
    let json = serde_json::to_string_pretty(&record).unwrap_or_default();
    out.push_str(PROVENANCE_START);
    out.push('\n');
    out.push_str(&json);
    out.push('\n');
    out.push_str(PROVENANCE_END);
    out.push('\n');
}

/// Scan a generated file for its provenance record.
///
/// Bounded line-by-line scan with three states: before the start marker,
/// inside the block, done. Returns `None` when the start marker never
/// appears, the end marker never appears (truncated write), or the body
/// fails to parse; all of those mean "unknown provenance" to the caller.
/// A second start marker inside the block is a `MalformedProvenance`
/// error: this tool never writes one, so the file cannot be ours.
pub fn extract_record<R: BufRead>(
    reader: R,
    path: &Path,
) -> Result<Option<ProvenanceRecord>, GenError> {
    let mut body = String::new();
    let mut has_started = false;

    for line in reader.lines() {
        let Ok(line) = line else {
            // Binary garbage or a read failure mid-scan: unknown provenance.
            return Ok(None);
        };
        let line = line.trim_end();

        if line == PROVENANCE_START {
            if has_started {
                return Err(GenError::MalformedProvenance {
                    path: path.to_path_buf(),
                });
            }
            has_started = true;
        } else if line == PROVENANCE_END && has_started {
            return Ok(serde_json::from_str(&body).ok());
        } else if has_started {
            body.push_str(line);
        }
    }

    Ok(None)
}

/// Read the recorded spec hash out of an existing output file.
///
/// A missing or unreadable output is not an error: it surfaces as `None`,
/// which the orchestrator treats as "no prior record".
pub fn existing_hash(path: &Path) -> Result<Option<String>, GenError> {
    if !path.is_file() {
        return Ok(None);
    }
    let Ok(file) = std::fs::File::open(path) else {
        return Ok(None);
    };
    let record = extract_record(std::io::BufReader::new(file), path)?;
    Ok(record.map(|r| r.generated_from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn extract(text: &str) -> Result<Option<ProvenanceRecord>, GenError> {
        extract_record(Cursor::new(text.to_string()), Path::new("out.dtg.h"))
    }

    #[test]
    fn round_trip_recovers_hash() {
        let hash = "ab".repeat(32);
        let mut text = String::new();
        render_disclaimer(Path::new("shapes/point.struct.toml"), &mut text);
        render_provenance(&hash, &mut text);
        text.push_str("\n#ifndef GUARD\n#endif // GUARD\n");

        let record = extract(&text).unwrap().unwrap();
        assert_eq!(record.generated_from, hash);
    }

    #[test]
    fn rendering_is_byte_stable() {
        let mut a = String::new();
        let mut b = String::new();
        render_provenance("00ff", &mut a);
        render_provenance("00ff", &mut b);
        assert_eq!(a, b);
        assert_eq!(
            a,
            "/* proj-data\n{\n  \"generated_from\": \"00ff\"\n}\n*/\n"
        );
    }

    #[test]
    fn missing_start_marker_is_none() {
        assert!(extract("int main(void) { return 0; }\n").unwrap().is_none());
    }

    #[test]
    fn truncated_block_is_none() {
        let text = "/* proj-data\n{\n  \"generated_from\": \"00ff\"\n";
        assert!(extract(text).unwrap().is_none());
    }

    #[test]
    fn unparseable_body_is_none() {
        let text = "/* proj-data\nnot json at all\n*/\n";
        assert!(extract(text).unwrap().is_none());
    }

    #[test]
    fn garbage_after_end_marker_is_ignored() {
        let text = "/* proj-data\n{\n  \"generated_from\": \"00ff\"\n}\n*/\n\u{0}\u{1}binary\n";
        let record = extract(text).unwrap().unwrap();
        assert_eq!(record.generated_from, "00ff");
    }

    #[test]
    fn duplicated_start_marker_is_internal_error() {
        let text = "/* proj-data\n/* proj-data\n*/\n";
        let err = extract(text).unwrap_err();
        assert!(matches!(err, GenError::MalformedProvenance { .. }));
    }

    #[test]
    fn existing_hash_none_for_missing_file() {
        assert_eq!(existing_hash(Path::new("/nonexistent/out.dtg.h")).unwrap(), None);
    }

    #[test]
    fn existing_hash_reads_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("point.dtg.h");
        let mut text = String::new();
        render_provenance("1234", &mut text);
        std::fs::write(&path, text).unwrap();
        assert_eq!(existing_hash(&path).unwrap(), Some("1234".to_string()));
    }
}
