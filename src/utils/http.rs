// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{AppError, Result};
use crate::models::ScraperConfig;

/// Create a configured blocking HTTP client.
///
/// A failure here means the TLS backend or resolver could not be set up,
/// which is reported as an environment error rather than a scrape failure.
pub fn create_client(config: &ScraperConfig) -> Result<Client> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| AppError::Client(e.to_string()))
}

/// Fetch a page body as text, failing on a 4xx/5xx status.
pub fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.text()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_default_config() {
        assert!(create_client(&ScraperConfig::default()).is_ok());
    }

    #[test]
    fn test_fetch_refused_connection_is_operational() {
        let client = create_client(&ScraperConfig::default()).unwrap();
        // Port 1 on loopback is never listening in a test sandbox.
        let err = fetch_text(&client, "http://127.0.0.1:1/").unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
        assert!(!err.is_fatal());
    }
}
