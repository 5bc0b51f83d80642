use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

pub const MILLIS_PER_MINUTE: i64 = 60_000;
pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Canonical timeline value: signed milliseconds since the Unix epoch (UTC).
///
/// Negative values reach back before 1970, down to the BCE years supported
/// by `chrono`'s proleptic Gregorian calendar. Year `0` is 1 BCE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instant(i64);

impl Instant {
    pub const EPOCH: Self = Self(0);

    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn millis(self) -> i64 {
        self.0
    }

    #[must_use]
    pub fn from_naive(value: NaiveDateTime) -> Self {
        Self(value.and_utc().timestamp_millis())
    }

    #[must_use]
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value.timestamp_millis())
    }

    /// Builds an instant from calendar fields. `year` may be zero or negative.
    #[must_use]
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .map(Self::from_naive)
    }

    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        Self::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    #[must_use]
    pub fn to_naive(self) -> Option<NaiveDateTime> {
        self.to_datetime().map(|value| value.naive_utc())
    }

    #[must_use]
    pub fn year(self) -> Option<i32> {
        self.to_naive().map(|value| value.year())
    }

    /// Fractional hours from `origin` to `self`.
    #[must_use]
    pub fn hours_since(self, origin: Self) -> f64 {
        (self.0 as f64 - origin.0 as f64) / MILLIS_PER_HOUR as f64
    }

    #[must_use]
    pub fn offset_by_hours(self, hours: f64) -> Self {
        if !hours.is_finite() {
            return self;
        }
        let delta = (hours * MILLIS_PER_HOUR as f64).round();
        Self((self.0 as f64 + delta).clamp(i64::MIN as f64, i64::MAX as f64) as i64)
    }
}

impl Sub for Instant {
    type Output = TimeDelta;

    fn sub(self, rhs: Self) -> TimeDelta {
        TimeDelta::milliseconds(self.0.saturating_sub(rhs.0).max(-i64::MAX))
    }
}

impl Add<TimeDelta> for Instant {
    type Output = Self;

    fn add(self, rhs: TimeDelta) -> Self {
        Self(self.0.saturating_add(rhs.num_milliseconds()))
    }
}

impl Sub<TimeDelta> for Instant {
    type Output = Self;

    fn sub(self, rhs: TimeDelta) -> Self {
        Self(self.0.saturating_sub(rhs.num_milliseconds()))
    }
}

impl From<NaiveDateTime> for Instant {
    fn from(value: NaiveDateTime) -> Self {
        Self::from_naive(value)
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_datetime(value)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{}ms", self.0),
        }
    }
}

/// Closed span between the earliest point start and the latest point end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: Instant,
    pub end: Instant,
}

impl TimeRange {
    #[must_use]
    pub fn new(start: Instant, end: Instant) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn hours(self) -> f64 {
        self.end.hours_since(self.start)
    }

    #[must_use]
    pub fn contains(self, instant: Instant) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Widens both ends by `padding`.
    #[must_use]
    pub fn padded(self, padding: TimeDelta) -> Self {
        Self {
            start: self.start - padding,
            end: self.end + padding,
        }
    }
}
