// src/services/source.rs

//! Where the results markup comes from.

use std::fs;
use std::path::PathBuf;

use reqwest::blocking::Client;

use crate::error::Result;
use crate::models::ScraperConfig;
use crate::utils::http::{create_client, fetch_text};

/// A provider of raw results markup.
pub trait PageSource {
    /// Human-readable location recorded as the snapshot's `source`.
    fn location(&self) -> &str;

    /// Retrieve the markup. Errors are scrape failures, not setup failures.
    fn fetch(&self) -> Result<String>;
}

/// Fetches the page with a single blocking GET.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Build a source for the configured URL, creating its HTTP client.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
            url: config.source_url.clone(),
        })
    }
}

impl PageSource for HttpSource {
    fn location(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<String> {
        log::info!("Fetching {}", self.url);
        let body = fetch_text(&self.client, &self.url)?;
        log::debug!("Received {} bytes", body.len());
        Ok(body)
    }
}

/// Reads a previously saved page from disk.
pub struct FileSource {
    path: PathBuf,
    label: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

impl PageSource for FileSource {
    fn location(&self) -> &str {
        &self.label
    }

    fn fetch(&self) -> Result<String> {
        log::info!("Reading saved page {}", self.label);
        Ok(fs::read_to_string(&self.path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_source_reads_markup() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("page.html");
        fs::write(&path, "<p>Constituency Results</p>").unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.location(), path.display().to_string());
        assert_eq!(source.fetch().unwrap(), "<p>Constituency Results</p>");
    }

    #[test]
    fn test_file_source_missing_file_is_recoverable() {
        let tmp = TempDir::new().unwrap();
        let source = FileSource::new(tmp.path().join("missing.html"));
        let err = source.fetch().unwrap_err();
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_http_source_location_is_url() {
        let source = HttpSource::new(&ScraperConfig::default()).unwrap();
        assert_eq!(
            source.location(),
            "https://election.jamaicaobserver.com/2025/"
        );
    }
}
