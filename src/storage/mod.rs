//! Storage for result snapshots.
//!
//! Each run replaces the previous artifacts wholesale; nothing is merged or
//! appended.
//!
//! ## Directory Structure
//!
//! ```text
//! data/
//! ├── results.json   # Full snapshot: source, fetched_at, rows, error?
//! └── results.csv    # Header + one line per row
//! ```

pub mod csv;
pub mod local;

use std::fmt;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::ResultSnapshot;

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a snapshot write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Number of rows written
    pub row_count: usize,
    /// Snapshot timestamp
    pub fetched_at: String,
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
}

impl fmt::Display for WriteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Saved {} rows at {}", self.row_count, self.fetched_at)
    }
}

/// Trait for snapshot storage backends.
pub trait SnapshotStorage {
    /// Replace the stored snapshot with `snapshot`.
    fn write_snapshot(&self, snapshot: &ResultSnapshot) -> Result<WriteSummary>;

    /// Load the stored snapshot, or `None` if no run has written one yet.
    fn load_snapshot(&self) -> Result<Option<ResultSnapshot>>;
}
