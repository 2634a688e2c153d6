//! Result row and snapshot data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time::format_timestamp;

/// One candidate line from the detailed results section.
///
/// Every value is kept as the text found on the page; nothing is coerced
/// to a number.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResultRow {
    pub constituency: String,
    pub parish: String,
    pub candidate: String,
    pub party: String,
    pub votes: String,
    /// Percentage with any `%` removed
    pub percent: String,
    pub status: String,
    pub boxes: String,
}

impl ResultRow {
    /// Column names, in CSV order.
    pub const FIELDS: [&'static str; 8] = [
        "constituency",
        "parish",
        "candidate",
        "party",
        "votes",
        "percent",
        "status",
        "boxes",
    ];

    /// Build a row from positional fragments.
    ///
    /// Returns `None` when fewer than eight fragments are given; extra
    /// fragments are ignored.
    pub fn from_fragments<S: AsRef<str>>(parts: &[S]) -> Option<Self> {
        if parts.len() < Self::FIELDS.len() {
            return None;
        }
        let part = |i: usize| parts[i].as_ref().to_string();

        Some(Self {
            constituency: part(0),
            parish: part(1),
            candidate: part(2),
            party: part(3),
            votes: part(4),
            percent: part(5).replace('%', ""),
            status: part(6),
            boxes: part(7),
        })
    }

    /// Look up a field by column name. Unknown names yield `None`.
    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "constituency" => &self.constituency,
            "parish" => &self.parish,
            "candidate" => &self.candidate,
            "party" => &self.party,
            "votes" => &self.votes,
            "percent" => &self.percent,
            "status" => &self.status,
            "boxes" => &self.boxes,
            _ => return None,
        };
        Some(value)
    }

    /// Mutable counterpart of [`ResultRow::get`].
    pub fn get_mut(&mut self, field: &str) -> Option<&mut String> {
        let value = match field {
            "constituency" => &mut self.constituency,
            "parish" => &mut self.parish,
            "candidate" => &mut self.candidate,
            "party" => &mut self.party,
            "votes" => &mut self.votes,
            "percent" => &mut self.percent,
            "status" => &mut self.status,
            "boxes" => &mut self.boxes,
            _ => return None,
        };
        Some(value)
    }

    /// Values in CSV column order.
    pub fn to_record(&self) -> Vec<String> {
        Self::FIELDS
            .iter()
            .map(|f| self.get(f).unwrap_or_default().to_string())
            .collect()
    }
}

/// The artifact produced by a single run.
///
/// Field order here is the field order of `results.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultSnapshot {
    /// Where the markup came from
    pub source: String,

    /// UTC time of the run, `YYYY-MM-DDTHH:MM:SSZ`
    pub fetched_at: String,

    #[serde(default)]
    pub rows: Vec<ResultRow>,

    /// Present only when the scrape failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultSnapshot {
    /// Snapshot of a successful scrape (possibly with zero rows).
    pub fn success(source: impl Into<String>, at: DateTime<Utc>, rows: Vec<ResultRow>) -> Self {
        Self {
            source: source.into(),
            fetched_at: format_timestamp(at),
            rows,
            error: None,
        }
    }

    /// Empty snapshot annotated with the failure message.
    pub fn failure(source: impl Into<String>, at: DateTime<Utc>, error: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            fetched_at: format_timestamp(at),
            rows: Vec::new(),
            error: Some(error.into()),
        }
    }
}
