//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── results.json
//! └── results.csv
//! ```
//!
//! Both artifacts are staged as sibling `.tmp` files before either is
//! renamed into place. If staging fails, the previous pair is left
//! untouched and the staged files are removed.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::{OutputConfig, ResultRow, ResultSnapshot};
use crate::storage::csv::{parse_rows, to_csv_string};
use crate::storage::{SnapshotStorage, WriteSummary};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    json_file: String,
    csv_file: String,
}

impl LocalStorage {
    /// Create a LocalStorage rooted at the given directory with the default
    /// file names.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(&OutputConfig {
            dir: root_dir.into(),
            ..OutputConfig::default()
        })
    }

    /// Create a LocalStorage from the output section of the configuration.
    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            root_dir: config.dir.clone(),
            json_file: config.json_file.clone(),
            csv_file: config.csv_file.clone(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn json_path(&self) -> PathBuf {
        self.root_dir.join(&self.json_file)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.root_dir.join(&self.csv_file)
    }

    /// Ensure the output directory exists.
    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root_dir).map_err(|e| AppError::storage(&self.root_dir, e))
    }

    /// Sibling temp path used while staging `path`.
    fn staging_path(path: &Path) -> PathBuf {
        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        path.with_file_name(tmp_name)
    }

    /// Write every `(path, bytes)` pair to its temp file, then rename them
    /// all into place. Nothing is renamed unless every temp file was written.
    fn write_staged(files: &[(&Path, &[u8])]) -> Result<()> {
        let mut staged: Vec<PathBuf> = Vec::with_capacity(files.len());

        for (path, bytes) in files {
            let tmp = Self::staging_path(path);
            if let Err(e) = fs::write(&tmp, bytes) {
                for leftover in staged.iter().chain(std::iter::once(&tmp)) {
                    let _ = fs::remove_file(leftover);
                }
                return Err(AppError::storage(&tmp, e));
            }
            staged.push(tmp);
        }

        for ((path, _), tmp) in files.iter().zip(&staged) {
            fs::rename(tmp, path).map_err(|e| AppError::storage(path, e))?;
        }
        Ok(())
    }

    /// Read a file, returning None if it doesn't exist.
    fn read_string(path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(path, e)),
        }
    }

    /// Read the CSV artifact back into rows.
    pub fn load_csv_rows(&self) -> Result<Option<Vec<ResultRow>>> {
        Ok(Self::read_string(&self.csv_path())?.map(|text| parse_rows(&text)))
    }
}

impl SnapshotStorage for LocalStorage {
    fn write_snapshot(&self, snapshot: &ResultSnapshot) -> Result<WriteSummary> {
        self.ensure_dir()?;

        let json_path = self.json_path();
        let csv_path = self.csv_path();
        let json = serde_json::to_string_pretty(snapshot)?;
        let csv = to_csv_string(&snapshot.rows);

        Self::write_staged(&[
            (json_path.as_path(), json.as_bytes()),
            (csv_path.as_path(), csv.as_bytes()),
        ])?;

        log::debug!(
            "Wrote {} and {}",
            json_path.display(),
            csv_path.display()
        );

        Ok(WriteSummary {
            row_count: snapshot.rows.len(),
            fetched_at: snapshot.fetched_at.clone(),
            json_path,
            csv_path,
        })
    }

    fn load_snapshot(&self) -> Result<Option<ResultSnapshot>> {
        match Self::read_string(&self.json_path())? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }
}
