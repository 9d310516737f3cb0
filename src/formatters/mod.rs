// ABOUTME: Timestamp rendering for API responses in UTC and India Standard Time
// ABOUTME: Produces RFC 3339 strings with millisecond precision for both zones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Dual-timezone timestamp formatting
//!
//! Every instant the API returns is rendered twice: once in UTC with a `Z`
//! suffix and once at the fixed `+05:30` offset of India Standard Time.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use smart_alarm_server::formatters::DualTimestamp;
//!
//! let instant = Utc.with_ymd_and_hms(2024, 1, 15, 6, 2, 13).unwrap();
//! let stamp = DualTimestamp::from_utc(instant);
//! assert_eq!(stamp.utc, "2024-01-15T06:02:13.000Z");
//! assert_eq!(stamp.ist, "2024-01-15T11:32:13.000+05:30");
//! ```

use crate::constants::timezone::IST_OFFSET_SECONDS;
use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One instant rendered in both reporting timezones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualTimestamp {
    /// RFC 3339, `Z` suffix
    pub utc: String,
    /// RFC 3339, `+05:30` offset
    pub ist: String,
}

impl DualTimestamp {
    /// Render `instant` in UTC and IST
    #[must_use]
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self {
            utc: format_utc(instant),
            ist: format_ist(instant),
        }
    }
}

impl From<DateTime<Utc>> for DualTimestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::from_utc(instant)
    }
}

/// The fixed India Standard Time offset
#[must_use]
pub fn ist_offset() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

/// `2024-01-15T06:02:13.123Z`
#[must_use]
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `2024-01-15T11:32:13.123+05:30`
#[must_use]
pub fn format_ist(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&ist_offset())
        .to_rfc3339_opts(SecondsFormat::Millis, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_ist_is_five_thirty_ahead() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap()
            + Duration::milliseconds(123);

        assert_eq!(format_utc(instant), "2024-01-15T06:00:00.123Z");
        assert_eq!(format_ist(instant), "2024-01-15T11:30:00.123+05:30");
    }

    #[test]
    fn test_ist_rolls_over_midnight() {
        let instant = Utc.with_ymd_and_hms(2024, 12, 31, 20, 45, 0).unwrap();
        assert_eq!(format_ist(instant), "2025-01-01T02:15:00.000+05:30");
    }

    #[test]
    fn test_dual_timestamp_serializes_both_fields() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 6, 5, 0).unwrap();
        let value = serde_json::to_value(DualTimestamp::from(instant)).unwrap();

        assert_eq!(value["utc"], "2024-01-15T06:05:00.000Z");
        assert_eq!(value["ist"], "2024-01-15T11:35:00.000+05:30");
    }

    #[test]
    fn test_ist_offset_seconds() {
        assert_eq!(ist_offset().local_minus_utc(), 19_800);
    }
}
