// src/pipeline/scrape.rs

//! Fetch → parse → persist, with the recovery boundary.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{ResultRow, ResultSnapshot};
use crate::services::{PageSource, RowExtractor};
use crate::storage::{SnapshotStorage, WriteSummary};

/// What a run ended up writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The page was fetched and parsed; zero rows is still a success.
    Saved(WriteSummary),
    /// Fetch or parse failed; an empty snapshot carrying the error was saved.
    Recovered { error: String, summary: WriteSummary },
}

impl RunOutcome {
    pub fn summary(&self) -> &WriteSummary {
        match self {
            Self::Saved(summary) | Self::Recovered { summary, .. } => summary,
        }
    }

    /// One-line report for the operator.
    pub fn report(&self) -> String {
        match self {
            Self::Saved(summary) => summary.to_string(),
            Self::Recovered { error, .. } => format!("Error: {error}"),
        }
    }
}

/// One scrape run wired from its three collaborators.
pub struct Pipeline<'a> {
    source: &'a dyn PageSource,
    extractor: &'a dyn RowExtractor,
    storage: &'a dyn SnapshotStorage,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        source: &'a dyn PageSource,
        extractor: &'a dyn RowExtractor,
        storage: &'a dyn SnapshotStorage,
    ) -> Self {
        Self {
            source,
            extractor,
            storage,
        }
    }

    /// Run now. The snapshot is stamped once fetch and parse have finished.
    pub fn run(&self) -> Result<RunOutcome> {
        self.run_with(Utc::now)
    }

    /// Run with a fixed snapshot timestamp.
    pub fn run_at(&self, at: DateTime<Utc>) -> Result<RunOutcome> {
        self.run_with(|| at)
    }

    /// Scrape failures are written into the snapshot and reported as
    /// `RunOutcome::Recovered`. Only environment errors (including a failed
    /// artifact write) are returned as `Err`.
    fn run_with(&self, clock: impl FnOnce() -> DateTime<Utc>) -> Result<RunOutcome> {
        let location = self.source.location();
        let scraped = self.scrape();
        let now = clock();

        match scraped {
            Ok(rows) => {
                let snapshot = ResultSnapshot::success(location, now, rows);
                let summary = self.storage.write_snapshot(&snapshot)?;
                log::info!("{summary}");
                Ok(RunOutcome::Saved(summary))
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                let error = e.to_string();
                log::warn!("Scrape of {location} failed: {error}");

                let snapshot = ResultSnapshot::failure(location, now, error.clone());
                let summary = self.storage.write_snapshot(&snapshot)?;
                Ok(RunOutcome::Recovered { error, summary })
            }
        }
    }

    fn scrape(&self) -> Result<Vec<ResultRow>> {
        let markup = self.source.fetch()?;
        let rows = self.extractor.extract(&markup);
        log::info!("Extracted {} rows", rows.len());
        Ok(rows)
    }
}
