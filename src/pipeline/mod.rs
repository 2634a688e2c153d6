//! Pipeline entry points.
//!
//! - `Pipeline`: fetch the page, extract rows, persist the snapshot

pub mod scrape;

pub use scrape::{Pipeline, RunOutcome};
