//! Queue reference clock
//!
//! Ticket numbering restarts every day, so "today" has to be resolved in a
//! single agreed time zone rather than in whatever zone a client happens to
//! be in.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use thiserror::Error;

/// Errors raised while building a [`QueueClock`].
#[derive(Debug, Error)]
pub enum ClockError {
    /// The configured IANA time zone could not be found.
    #[error("unknown time zone {name:?}")]
    UnknownTimeZone {
        /// Name as configured.
        name: String,

        /// Lookup failure.
        #[source]
        source: jiff::Error,
    },
}

/// Resolves the current instant and the current business day.
#[derive(Debug, Clone)]
pub struct QueueClock {
    time_zone: TimeZone,
}

impl QueueClock {
    #[must_use]
    pub fn new(time_zone: TimeZone) -> Self {
        Self { time_zone }
    }

    /// Clock pinned to UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self::new(TimeZone::UTC)
    }

    /// Build a clock from an IANA time zone name such as `Asia/Riyadh`.
    ///
    /// # Errors
    ///
    /// Returns an error when the zone is not in the time zone database.
    pub fn from_zone_name(name: &str) -> Result<Self, ClockError> {
        TimeZone::get(name)
            .map(Self::new)
            .map_err(|source| ClockError::UnknownTimeZone {
                name: name.to_string(),
                source,
            })
    }

    #[must_use]
    pub fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    /// Civil date of `timestamp` in the queue's zone.
    #[must_use]
    pub fn date_of(&self, timestamp: Timestamp) -> Date {
        timestamp.to_zoned(self.time_zone.clone()).date()
    }

    #[must_use]
    pub fn today(&self) -> Date {
        self.date_of(self.now())
    }

    /// Resolve an optional caller-supplied day, defaulting to today.
    #[must_use]
    pub fn resolve(&self, date: Option<Date>) -> Date {
        date.unwrap_or_else(|| self.today())
    }
}

impl Default for QueueClock {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn date_of_respects_the_configured_zone() -> TestResult {
        // 22:30 UTC on the 1st is already the 2nd in Riyadh (UTC+3).
        let instant: Timestamp = "2026-03-01T22:30:00Z".parse()?;

        assert_eq!(QueueClock::utc().date_of(instant), date(2026, 3, 1));
        assert_eq!(
            QueueClock::from_zone_name("Asia/Riyadh")?.date_of(instant),
            date(2026, 3, 2)
        );

        Ok(())
    }

    #[test]
    fn resolve_prefers_the_explicit_date() {
        let clock = QueueClock::utc();

        assert_eq!(clock.resolve(Some(date(2025, 12, 31))), date(2025, 12, 31));
        assert_eq!(clock.resolve(None), clock.today());
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let result = QueueClock::from_zone_name("Mars/Olympus_Mons");

        assert!(
            matches!(result, Err(ClockError::UnknownTimeZone { .. })),
            "expected UnknownTimeZone, got {result:?}"
        );
    }
}
