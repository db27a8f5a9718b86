pub mod output;

pub use output::{create_writer, OutputFormat, OutputWriter};

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::core::{Error, Result, ResultExt};

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::file_system("Failed to read file", path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::file_system("Failed to write file", path, e))
}

/// Parse application records from JSON text.
///
/// Accepts a single record object or an array of record objects.
pub fn parse_records(contents: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(contents)? {
        record @ Value::Object(_) => Ok(vec![record]),
        Value::Array(records) => {
            if let Some(position) = records.iter().position(|r| !r.is_object()) {
                return Err(Error::InvalidRecord(format!(
                    "element {} of the array is not an object",
                    position
                )));
            }
            Ok(records)
        }
        _ => Err(Error::InvalidRecord(
            "expected a record object or an array of records".to_string(),
        )),
    }
}

/// Read and parse application records from a file
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    let contents = read_file(path)?;
    parse_records(&contents).context(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_single_and_batch() {
        assert_eq!(parse_records(r#"{"id": 1}"#).unwrap().len(), 1);
        assert_eq!(parse_records(r#"[{"id": 1}, {"id": 2}]"#).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_rejects_non_records() {
        assert!(matches!(
            parse_records("42"),
            Err(Error::InvalidRecord(_))
        ));
        assert!(matches!(
            parse_records(r#"[{"id": 1}, "x"]"#),
            Err(Error::InvalidRecord(message)) if message.contains("element 1")
        ));
        assert!(matches!(parse_records("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_records_adds_path_context() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        write_file(&path, "true").unwrap();
        let err = load_records(&path).unwrap_err();
        assert!(err.to_string().contains("records.json"));

        assert!(matches!(
            load_records(&dir.path().join("missing.json")),
            Err(Error::FileSystem { .. })
        ));
    }
}
