use chrono::{DateTime, SecondsFormat, Utc};

/// Get the current server time (UTC).
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp as RFC 3339 with millisecond precision, e.g. `2025-01-01T00:00:00.000Z`
pub fn to_rfc3339(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
