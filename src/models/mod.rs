// src/models/mod.rs

//! Domain models for the scraper.

mod config;
mod result;

pub use config::{Config, ExtractConfig, OutputConfig, ScraperConfig};
pub use result::{ResultRow, ResultSnapshot};
