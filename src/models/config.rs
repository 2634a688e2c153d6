//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
///
/// Every field has a default, so an empty file (or no file at all)
/// reproduces the built-in scrape target.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Target page and HTTP behavior
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// Row extraction heuristics
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Artifact locations
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {e}", path.display())))?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.scraper.user_agent.trim().is_empty() {
            return Err(AppError::validation("scraper.user_agent is empty"));
        }
        if self.scraper.timeout_secs == 0 {
            return Err(AppError::validation("scraper.timeout_secs must be > 0"));
        }

        let url = Url::parse(&self.scraper.source_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "scraper.source_url must be http(s), got {}",
                url.scheme()
            )));
        }

        if self.extract.anchors.iter().all(|a| a.is_empty()) {
            return Err(AppError::validation("extract.anchors is empty"));
        }
        if self.extract.status_tokens.iter().all(|t| t.is_empty()) {
            return Err(AppError::validation("extract.status_tokens is empty"));
        }
        if self.extract.separator.is_empty() {
            return Err(AppError::validation("extract.separator is empty"));
        }

        if self.output.json_file.trim().is_empty() || self.output.csv_file.trim().is_empty() {
            return Err(AppError::validation("output file names must not be empty"));
        }
        if self.output.json_file == self.output.csv_file {
            return Err(AppError::validation(
                "output.json_file and output.csv_file must differ",
            ));
        }
        Ok(())
    }
}

/// Scrape target and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Page holding the live results
    #[serde(default = "defaults::source_url")]
    pub source_url: String,

    /// User-Agent header for the request
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            source_url: defaults::source_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Literal markers used by the row heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Phrases that open the detailed results section, in priority order
    #[serde(default = "defaults::anchors")]
    pub anchors: Vec<String>,

    /// Phrases that mark the start of the page footer
    #[serde(default = "defaults::stop_markers")]
    pub stop_markers: Vec<String>,

    /// Phrases that identify a text node as a data row
    #[serde(default = "defaults::status_tokens")]
    pub status_tokens: Vec<String>,

    /// Separator between fields inside a row's text
    #[serde(default = "defaults::separator")]
    pub separator: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            anchors: defaults::anchors(),
            stop_markers: defaults::stop_markers(),
            status_tokens: defaults::status_tokens(),
            separator: defaults::separator(),
        }
    }
}

/// Where the snapshot artifacts are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::output_dir")]
    pub dir: PathBuf,

    #[serde(default = "defaults::json_file")]
    pub json_file: String,

    #[serde(default = "defaults::csv_file")]
    pub csv_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            json_file: defaults::json_file(),
            csv_file: defaults::csv_file(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Scraper defaults
    pub fn source_url() -> String {
        "https://election.jamaicaobserver.com/2025/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Extraction defaults
    pub fn anchors() -> Vec<String> {
        vec![
            "Detailed Results by Constituency".into(),
            "Constituency Results".into(),
        ]
    }
    pub fn stop_markers() -> Vec<String> {
        vec![
            "Follow Us".into(),
            "Connect With Us".into(),
            "Mobile Apps".into(),
            "©".into(),
        ]
    }
    pub fn status_tokens() -> Vec<String> {
        vec!["Not Started".into(), "Counting".into(), "Declared".into()]
    }
    pub fn separator() -> String {
        "  ".into()
    }

    // Output defaults
    pub fn output_dir() -> PathBuf {
        PathBuf::from("data")
    }
    pub fn json_file() -> String {
        "results.json".into()
    }
    pub fn csv_file() -> String {
        "results.csv".into()
    }
}
