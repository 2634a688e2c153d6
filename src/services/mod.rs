//! Service layer for the scraper.
//!
//! - Page retrieval (`PageSource`: `HttpSource`, `FileSource`)
//! - Row extraction (`RowExtractor`: `HeuristicExtractor`)

mod extract;
mod source;

pub use extract::{HeuristicExtractor, RowExtractor};
pub use source::{FileSource, HttpSource, PageSource};
