use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::config::Number;

/// One stored link, as fetched from the shared repository. The embedding is
/// persisted as serialized JSON text in a generic column, so it may be
/// absent or unparsable on any individual record.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct LinkRecord {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub vector: Option<String>,
}

impl LinkRecord {
    /// Deserialize the stored embedding. Absent, unparsable, and empty
    /// vectors all come back as `None`; the record is then skipped by the
    /// matcher rather than failing the batch.
    pub fn parse_vector(&self) -> Option<Vec<Number>> {
        let raw = self.vector.as_deref()?;
        let vector: Vec<Number> = serde_json::from_str(raw).ok()?;
        if vector.is_empty() {
            return None;
        }
        Some(vector)
    }
}

pub fn parse_record_line(line: &str) -> Result<LinkRecord> {
    serde_json::from_str(line).context("Failed to parse JSON record")
}

/// Load a snapshot of link records from a JSONL file. Lines that do not
/// parse as a record are skipped with a warning; per-entry degradation
/// extends to the record envelope itself.
pub fn load_snapshot(path: &str) -> Result<Vec<LinkRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open snapshot file '{}'", path))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (line_number, line_result) in reader.lines().enumerate() {
        let line = line_result
            .with_context(|| format!("Failed to read line {} of '{}'", line_number + 1, path))?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_record_line(&line) {
            Ok(record) => records.push(record),
            Err(err) => {
                eprintln!(
                    "Warning: skipping line {} of '{}': {}",
                    line_number + 1,
                    path,
                    err
                );
            }
        }
    }

    crate::config::verbose_print(&format!(
        "Loaded {} records from '{}'",
        records.len(),
        path
    ));

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record_with_vector(vector: Option<&str>) -> LinkRecord {
        LinkRecord {
            id: "abc123".to_string(),
            url: Some("https://example.com".to_string()),
            summary: None,
            vector: vector.map(str::to_string),
        }
    }

    #[test]
    fn parses_serialized_vector() {
        let record = record_with_vector(Some("[1.0, 2.5, -3.0]"));
        assert_eq!(record.parse_vector(), Some(vec![1.0, 2.5, -3.0]));
    }

    #[test]
    fn absent_vector_is_none() {
        assert_eq!(record_with_vector(None).parse_vector(), None);
    }

    #[test]
    fn unparsable_vector_is_none() {
        assert_eq!(record_with_vector(Some("not-json")).parse_vector(), None);
        assert_eq!(
            record_with_vector(Some("{\"a\": 1}")).parse_vector(),
            None
        );
        assert_eq!(
            record_with_vector(Some("[1.0, \"x\"]")).parse_vector(),
            None
        );
    }

    #[test]
    fn empty_vector_is_none() {
        assert_eq!(record_with_vector(Some("[]")).parse_vector(), None);
    }

    #[test]
    fn record_line_roundtrip() {
        let line = r#"{"id":"7","url":"https://example.com","summary":"a page","vector":"[0.1,0.2]"}"#;
        let record = parse_record_line(line).unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(record.parse_vector(), Some(vec![0.1, 0.2]));
    }

    #[test]
    fn record_line_missing_optional_fields() {
        let record = parse_record_line(r#"{"id":"9"}"#).unwrap();
        assert_eq!(record.id, "9");
        assert!(record.url.is_none());
        assert!(record.vector.is_none());
    }

    #[test]
    fn snapshot_skips_garbage_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id":"a","vector":"[1.0]"}}"#).unwrap();
        writeln!(file, "this is not json").unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"id":"b"}}"#).unwrap();
        file.flush().unwrap();

        let records = load_snapshot(file.path().to_str().unwrap()).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn snapshot_missing_file_is_an_error() {
        assert!(load_snapshot("/nonexistent/snapshot.jsonl").is_err());
    }
}
