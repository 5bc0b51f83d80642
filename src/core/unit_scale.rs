use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::core::Instant;

/// Gridline resolutions, finest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeTier {
    Hours,
    AmPm,
    Days,
    Weeks,
    Months,
    Years,
    Tens,
    Fifty,
    Hundred,
    FiveHundred,
    Thousand,
}

/// Factor from the previous tier's unit to this tier's unit.
pub const TIER_WIDENING: [f64; 11] = [1.0, 12.0, 2.0, 7.0, 4.0, 13.0, 10.0, 5.0, 2.0, 5.0, 2.0];

impl TimeTier {
    pub const ALL: [Self; 11] = [
        Self::Hours,
        Self::AmPm,
        Self::Days,
        Self::Weeks,
        Self::Months,
        Self::Years,
        Self::Tens,
        Self::Fifty,
        Self::Hundred,
        Self::FiveHundred,
        Self::Thousand,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::AmPm => "ampm",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
            Self::Tens => "tens",
            Self::Fifty => "fifty",
            Self::Hundred => "hundred",
            Self::FiveHundred => "five hundred",
            Self::Thousand => "thousand",
        }
    }

    /// Nominal unit length in hours (product of the widening factors).
    #[must_use]
    pub fn nominal_hours(self) -> f64 {
        TIER_WIDENING[..=self.index()].iter().product()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierSelection {
    pub tier: TimeTier,
    pub pixels_per_unit: f64,
}

/// Picks the primary tier for a scale.
///
/// Hours only have to reach half of `min_spacing` since they carry no
/// sub-tier.
#[must_use]
pub fn select_tier(pixels_per_hour: f64, min_spacing: f64) -> TierSelection {
    if valid_scale(pixels_per_hour) && pixels_per_hour >= min_spacing / 2.0 {
        return TierSelection {
            tier: TimeTier::Hours,
            pixels_per_unit: pixels_per_hour,
        };
    }
    widen(pixels_per_hour, min_spacing)
}

/// Picks a tier for `min_spacing` without the hour allowance.
#[must_use]
pub fn select_sub_tier(pixels_per_hour: f64, min_spacing: f64) -> TierSelection {
    widen(pixels_per_hour, min_spacing)
}

fn widen(pixels_per_hour: f64, min_spacing: f64) -> TierSelection {
    if !valid_scale(pixels_per_hour) {
        return TierSelection {
            tier: TimeTier::Thousand,
            pixels_per_unit: 0.0,
        };
    }

    let mut index = 0;
    let mut pixels_per_unit = pixels_per_hour;
    while pixels_per_unit < min_spacing && index + 1 < TimeTier::ALL.len() {
        index += 1;
        pixels_per_unit *= TIER_WIDENING[index];
    }
    TierSelection {
        tier: TimeTier::ALL[index],
        pixels_per_unit,
    }
}

fn valid_scale(pixels_per_hour: f64) -> bool {
    pixels_per_hour.is_finite() && pixels_per_hour > 0.0
}

// Math.round: halves go toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn rounded_year(year: i32, bias: i32, step: i32) -> i32 {
    round_half_up(f64::from(year + bias) / f64::from(step)) as i32 * step
}

fn new_year(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1).map(|date| date.and_time(NaiveTime::MIN))
}

/// The first calendar boundary of `tier` strictly after `from` (UTC).
#[must_use]
pub fn next_boundary(from: Instant, tier: TimeTier) -> Option<Instant> {
    let value = from.to_naive()?;
    let midnight = value.date().and_time(NaiveTime::MIN);

    let next = match tier {
        TimeTier::Hours => {
            let hour = midnight.checked_add_signed(TimeDelta::hours(i64::from(value.hour())))?;
            hour.checked_add_signed(TimeDelta::hours(1))?
        }
        TimeTier::AmPm => {
            let hours = if value.hour() < 12 { 12 } else { 24 };
            midnight.checked_add_signed(TimeDelta::hours(hours))?
        }
        TimeTier::Days => midnight.checked_add_signed(TimeDelta::days(1))?,
        TimeTier::Weeks => {
            let ahead = 7 - i64::from(value.weekday().num_days_from_sunday());
            midnight.checked_add_signed(TimeDelta::days(ahead))?
        }
        TimeTier::Months => {
            let first = value.date().with_day(1)?;
            first
                .checked_add_months(Months::new(1))?
                .and_time(NaiveTime::MIN)
        }
        TimeTier::Years => new_year(value.year().checked_add(1)?)?,
        TimeTier::Tens => new_year(rounded_year(value.year(), 0, 10).checked_add(10)?)?,
        TimeTier::Fifty => new_year(rounded_year(value.year(), 49, 50))?,
        TimeTier::Hundred => new_year(rounded_year(value.year(), 0, 100).checked_add(100)?)?,
        TimeTier::FiveHundred => new_year(rounded_year(value.year(), 499, 500))?,
        TimeTier::Thousand => new_year(rounded_year(value.year(), 0, 1000).checked_add(1000)?)?,
    };

    Some(Instant::from_naive(next))
}

/// One gridline position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    /// 1-based position in the sequence.
    pub ordinal: usize,
    pub offset_px: f64,
    pub instant: Instant,
}

/// Lazily enumerated boundaries of one tier across a pixel extent.
///
/// The sequence is a plain description; every `iter()` call restarts from
/// `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundarySequence {
    pub start: Instant,
    pub tier: TimeTier,
    pub pixels_per_hour: f64,
    pub max_extent: f64,
}

#[must_use]
pub fn enumerate_boundaries(
    start: Instant,
    tier: TimeTier,
    pixels_per_hour: f64,
    max_extent: f64,
) -> BoundarySequence {
    BoundarySequence {
        start,
        tier,
        pixels_per_hour,
        max_extent,
    }
}

impl BoundarySequence {
    #[must_use]
    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_hour * self.tier.nominal_hours()
    }

    /// Upper bound on the number of boundaries yielded.
    #[must_use]
    pub fn max_count(&self) -> usize {
        let unit = self.pixels_per_unit();
        if !valid_scale(unit) || !self.max_extent.is_finite() || self.max_extent <= 0.0 {
            return 0;
        }
        let total_units = (self.max_extent / unit).ceil();
        if total_units <= 1.0 {
            0
        } else {
            (total_units - 1.0).min(usize::MAX as f64) as usize
        }
    }

    #[must_use]
    pub fn iter(&self) -> BoundaryIter {
        BoundaryIter {
            sequence: *self,
            cursor: self.start,
            ordinal: 0,
            limit: self.max_count(),
        }
    }
}

impl IntoIterator for &BoundarySequence {
    type Item = Boundary;
    type IntoIter = BoundaryIter;

    fn into_iter(self) -> BoundaryIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct BoundaryIter {
    sequence: BoundarySequence,
    cursor: Instant,
    ordinal: usize,
    limit: usize,
}

impl Iterator for BoundaryIter {
    type Item = Boundary;

    fn next(&mut self) -> Option<Boundary> {
        if self.ordinal >= self.limit {
            return None;
        }
        let next = next_boundary(self.cursor, self.sequence.tier)?;
        if next <= self.cursor {
            self.limit = 0;
            return None;
        }

        let offset_px = next.hours_since(self.sequence.start) * self.sequence.pixels_per_hour;
        if offset_px > self.sequence.max_extent {
            self.limit = 0;
            return None;
        }

        self.ordinal += 1;
        self.cursor = next;
        Some(Boundary {
            ordinal: self.ordinal,
            offset_px,
            instant: next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{TimeTier, next_boundary, select_tier};
    use crate::core::Instant;

    #[test]
    fn hours_keep_the_half_spacing_allowance() {
        assert_eq!(select_tier(100.0, 200.0).tier, TimeTier::Hours);
        let selection = select_tier(99.0, 200.0);
        assert_eq!(selection.tier, TimeTier::AmPm);
        assert_eq!(selection.pixels_per_unit, 99.0 * 12.0);
    }

    #[test]
    fn tens_round_half_up_before_stepping() {
        let from = Instant::from_ymd(2025, 6, 1).expect("from");
        let next = next_boundary(from, TimeTier::Tens).expect("next");
        assert_eq!(next, Instant::from_ymd(2040, 1, 1).expect("expected"));

        let bce = Instant::from_ymd(-25, 6, 1).expect("bce");
        let next = next_boundary(bce, TimeTier::Tens).expect("next");
        assert_eq!(next, Instant::from_ymd(-10, 1, 1).expect("expected"));
    }
}
