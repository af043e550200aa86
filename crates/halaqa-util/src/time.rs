//! Time utilities for halaqa
//!
//! The status engine never reads the clock itself; callers pass `now` in.
//! This module is where binaries get that reading from.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `HALAQA_MOCK_TIME` environment variable can be set
//! to shift the clock returned by [`now`]. The mock clock starts at the given
//! instant and advances at the rate of real time, so a schedule can be
//! watched walking through its upcoming, ready and live states.
//!
//! Accepted formats are the ones [`parse_instant`] understands, e.g.
//! `2026-10-17T17:50:00Z` or `2026-10-17 17:50:00` (local time).
//!
//! Example:
//! ```bash
//! HALAQA_MOCK_TIME="2026-10-17 17:50:00" halaqa-board --watch
//! ```

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use std::sync::OnceLock;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "HALAQA_MOCK_TIME";

/// Local wall-clock format accepted alongside RFC 3339
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Offset between the mock clock and the real clock, fixed at first use.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

#[allow(clippy::disallowed_methods)] // This is the internal implementation that wraps Utc::now()
fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                match parse_instant(&mock_time_str) {
                    Some(mock_dt) => {
                        let offset = mock_dt.signed_duration_since(Utc::now());
                        tracing::info!(
                            mock_time = %mock_time_str,
                            offset_secs = offset.num_seconds(),
                            "Mock time enabled"
                        );
                        return Some(offset);
                    }
                    None => {
                        tracing::warn!(
                            mock_time = %mock_time_str,
                            expected_format = "RFC 3339 or %Y-%m-%d %H:%M:%S",
                            "Invalid mock time format"
                        );
                    }
                }
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current instant, respecting mock time settings in debug builds.
///
/// This is a plain wall-clock read. No skew correction is applied, so a
/// client with a wrong system clock sees shifted statuses.
#[allow(clippy::disallowed_methods)] // This is the wrapper that provides mock time support
pub fn now() -> DateTime<Utc> {
    let real_now = Utc::now();

    if let Some(offset) = get_mock_time_offset() {
        real_now + offset
    } else {
        real_now
    }
}

/// Parse an instant from RFC 3339 (`2026-10-17T18:00:00Z`, any offset)
/// or from `YYYY-MM-DD HH:MM:SS` interpreted in the local timezone.
///
/// Returns `None` for anything else, including local times that do not
/// exist or are ambiguous because of a DST transition.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, LOCAL_DATETIME_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format an instant as local `HH:MM`, for session cards.
pub fn format_clock_time(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%H:%M").to_string()
}

/// Format an instant as local full date and time.
pub fn format_datetime_full(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local)
        .format(LOCAL_DATETIME_FORMAT)
        .to_string()
}
