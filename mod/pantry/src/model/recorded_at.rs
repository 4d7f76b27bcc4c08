use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Midday UTC time appended to a bare date when no precise record exists.
pub const FALLBACK_TIME_SUFFIX: &str = "T12:00:00.000Z";

/// The accepted stored shapes of a consumption record's timestamp.
///
/// Historical records wrote this field in three different forms over the
/// application's life. Normalization is one deterministic conversion to an
/// ISO-8601 string; a value matching none of the shapes is treated as
/// absent and the caller falls back to [`fallback_timestamp`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RecordedAt {
    /// Native timestamp object: `{"seconds": ..., "nanos": ...}`.
    Native {
        seconds: i64,
        #[serde(default)]
        nanos: u32,
    },

    /// Epoch milliseconds.
    Millis(i64),

    /// Pre-formatted timestamp string.
    Text(String),
}

impl RecordedAt {
    /// Interpret a raw JSON value as one of the accepted shapes.
    /// Returns None when the value matches none of them.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Normalize to an ISO-8601 string with millisecond precision,
    /// e.g. `2025-01-10T03:15:00.000Z`. Returns None for out-of-range
    /// or unparseable values.
    pub fn to_iso(&self) -> Option<String> {
        let dt = match self {
            RecordedAt::Native { seconds, nanos } => {
                Utc.timestamp_opt(*seconds, *nanos).single()?
            }
            RecordedAt::Millis(ms) => Utc.timestamp_millis_opt(*ms).single()?,
            RecordedAt::Text(s) => DateTime::parse_from_rfc3339(s)
                .ok()?
                .with_timezone(&Utc),
        };
        Some(iso_millis(dt))
    }
}

/// Format a UTC instant as ISO-8601 with millisecond precision and `Z`.
pub fn iso_millis(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Derived timestamp for a day with no precise record: the last-served
/// date at fixed midday UTC.
pub fn fallback_timestamp(last_served_date: &str) -> String {
    format!("{last_served_date}{FALLBACK_TIME_SUFFIX}")
}
