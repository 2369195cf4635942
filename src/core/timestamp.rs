//! Timestamp layouts for the log line prefix
//!
//! A logger renders the emission time with its configured [`TimeFormat`] and
//! places it in front of the message. [`TimeFormat::Disabled`] turns the
//! prefix off entirely.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Swappable timestamp layout
///
/// # Examples
///
/// ```
/// use loki_logger::TimeFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(
///     TimeFormat::Rfc3339.format(&at).as_deref(),
///     Some("2025-01-08T10:30:45+00:00")
/// );
/// assert_eq!(TimeFormat::Disabled.format(&at), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    /// No timestamp prefix
    Disabled,

    /// RFC 3339 with offset, second precision: `2025-01-08T10:30:45+01:00`
    #[default]
    Rfc3339,

    /// RFC 2822: `Wed, 08 Jan 2025 10:30:45 +0100`
    Rfc2822,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123+01:00`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456+01:00`
    Iso8601Micros,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime layout, e.g. `"%d/%b/%Y:%H:%M:%S %z"`
    Custom(String),
}

impl TimeFormat {
    /// Render `datetime`, or `None` when timestamps are disabled
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let rendered = match self {
            TimeFormat::Disabled => return None,
            TimeFormat::Rfc3339 => datetime.format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
            TimeFormat::Rfc2822 => datetime.to_rfc2822(),
            TimeFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimeFormat::Iso8601Micros => {
                datetime.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string()
            }
            TimeFormat::Unix => datetime.timestamp().to_string(),
            TimeFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimeFormat::Custom(layout) => {
                // an invalid strftime item makes chrono's Display fail
                let mut out = String::new();
                if fmt::write(&mut out, format_args!("{}", datetime.format(layout))).is_err() {
                    return Some(format!("<bad time format {:?}>", layout));
                }
                out
            }
        };
        Some(rendered)
    }

    /// Render the current local time
    #[must_use]
    pub fn now(&self) -> Option<String> {
        self.format(&Local::now())
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, TimeFormat::Disabled)
    }

    /// Create a custom strftime layout; an empty layout disables timestamps
    #[must_use]
    pub fn custom(layout: impl Into<String>) -> Self {
        let layout = layout.into();
        if layout.is_empty() {
            TimeFormat::Disabled
        } else {
            TimeFormat::Custom(layout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_disabled_renders_nothing() {
        assert_eq!(TimeFormat::Disabled.format(&fixed_datetime()), None);
        assert!(!TimeFormat::Disabled.is_enabled());
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimeFormat::Rfc3339.format(&fixed_datetime());
        assert_eq!(result.as_deref(), Some("2025-01-08T10:30:45+00:00"));
    }

    #[test]
    fn test_rfc3339_keeps_offset() {
        let offset = FixedOffset::east_opt(3600).expect("valid offset");
        let local = fixed_datetime().with_timezone(&offset);
        let result = TimeFormat::Rfc3339.format(&local);
        assert_eq!(result.as_deref(), Some("2025-01-08T11:30:45+01:00"));
    }

    #[test]
    fn test_rfc2822_format() {
        let result = TimeFormat::Rfc2822.format(&fixed_datetime()).unwrap();
        assert!(result.starts_with("Wed, "));
        assert!(result.ends_with("Jan 2025 10:30:45 +0000"));
    }

    #[test]
    fn test_iso8601_formats() {
        let dt = fixed_datetime();
        assert_eq!(
            TimeFormat::Iso8601.format(&dt).as_deref(),
            Some("2025-01-08T10:30:45.123+00:00")
        );
        assert_eq!(
            TimeFormat::Iso8601Micros.format(&dt).as_deref(),
            Some("2025-01-08T10:30:45.123456+00:00")
        );
    }

    #[test]
    fn test_unix_formats() {
        let dt = fixed_datetime();
        let secs: i64 = TimeFormat::Unix.format(&dt).unwrap().parse().unwrap();
        let millis: i64 = TimeFormat::UnixMillis.format(&dt).unwrap().parse().unwrap();
        assert_eq!(secs, 1736332245);
        assert_eq!(millis, 1736332245123);
    }

    #[test]
    fn test_custom_format() {
        let format = TimeFormat::custom("%d/%b/%Y:%H:%M:%S");
        let result = format.format(&fixed_datetime());
        assert_eq!(result.as_deref(), Some("08/Jan/2025:10:30:45"));
    }

    #[test]
    fn test_empty_custom_layout_disables() {
        assert_eq!(TimeFormat::custom(""), TimeFormat::Disabled);
    }

    #[test]
    fn test_default_is_rfc3339() {
        assert_eq!(TimeFormat::default(), TimeFormat::Rfc3339);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&TimeFormat::Disabled).expect("serialize");
        assert_eq!(json, "\"Disabled\"");

        let format: TimeFormat =
            serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).expect("deserialize Custom");
        assert_eq!(format, TimeFormat::Custom("%Y-%m-%d".to_string()));
    }
}
