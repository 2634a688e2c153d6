//! Timestamp formatting.

use chrono::{DateTime, Utc};

/// Format used for `fetched_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a UTC instant as `YYYY-MM-DDTHH:MM:SSZ` (second resolution).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_drops_subseconds() {
        let at = Utc.with_ymd_and_hms(2025, 9, 3, 7, 4, 5).unwrap()
            + chrono::Duration::milliseconds(987);
        assert_eq!(format_timestamp(at), "2025-09-03T07:04:05Z");
    }
}
