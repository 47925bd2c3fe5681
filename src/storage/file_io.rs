//! JSON file helpers
//!
//! Writes go to a sibling temp file that is renamed over the target, so a
//! data file is either the old version or the new one, never half written.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CashflowError, CashflowResult};

/// Read JSON from `path`, or `T::default()` when the file does not exist
pub fn read_json<T, P>(path: P) -> CashflowResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| CashflowError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| CashflowError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write `data` as pretty JSON, replacing `path` atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> CashflowResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CashflowError::Storage(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path)
        .map_err(|e| CashflowError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer
        .flush()
        .and_then(|_| writer.get_ref().sync_all())
        .map_err(|e| CashflowError::Storage(format!("Failed to write {}: {}", path.display(), e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CashflowError::Storage(format!("Failed to replace {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        shares: Vec<f64>,
    }

    #[test]
    fn test_missing_file_reads_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Sample = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, Sample::default());
    }

    #[test]
    fn test_write_then_read_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("sample.json");
        let data = Sample {
            name: "plan".into(),
            shares: vec![10.0, 12.5],
        };

        write_json_atomic(&path, &data).unwrap();
        assert!(!temp_dir.path().join("nested").join("sample.json.tmp").exists());

        let loaded: Sample = read_json(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_invalid_json_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ nope").unwrap();
        let result: CashflowResult<Sample> = read_json(&path);
        assert!(matches!(result, Err(CashflowError::Storage(_))));
    }
}
