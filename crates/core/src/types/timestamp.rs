//! Timestamp rendering.

use chrono::{DateTime, Utc};

/// Rendered for a missing timestamp.
pub const NOT_AVAILABLE: &str = "N/A";

/// Render a timestamp as e.g. `Mar 04, 2025`, or `N/A` when absent.
#[must_use]
pub fn format_timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |ts| ts.format("%b %d, %Y").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_missing_timestamp_renders_na() {
        assert_eq!(format_timestamp(None), "N/A");
    }

    #[test]
    fn test_present_timestamp() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).single();
        assert_eq!(format_timestamp(ts), "Mar 04, 2025");
    }
}
