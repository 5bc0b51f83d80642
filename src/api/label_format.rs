use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::core::date_normalizer::{
    DEFAULT_BCE_SUFFIX, DEFAULT_CE_SUFFIX, day_name, format_instant, month_name,
};
use crate::core::{Boundary, Instant, TimeTier};

use super::TimelineConfig;

// Every Nth midnight on the am/pm tier carries its year.
const AMPM_YEAR_EVERY: usize = 5;
const CALENDAR_YEAR_EVERY: usize = 3;

pub(super) fn year_text(instant: Instant, bce: &str, ce: &str) -> String {
    format_instant(instant, "%Y", bce, ce).unwrap_or_else(|| instant.to_string())
}

fn hour_text(value: NaiveDateTime, ampm: bool) -> String {
    if !ampm {
        return format!("{:02}:00", value.hour());
    }
    let (is_pm, hour) = value.hour12();
    format!("{hour} {}", if is_pm { "PM" } else { "AM" })
}

fn month_day_text(value: NaiveDateTime, config: &TimelineConfig) -> String {
    format!(
        "{} {:02}",
        month_name(value.month(), config.use_month_abbr),
        value.day()
    )
}

fn with_default_year(mut text: String, instant: Instant) -> String {
    text.push_str(", ");
    text.push_str(&year_text(instant, DEFAULT_BCE_SUFFIX, DEFAULT_CE_SUFFIX));
    text
}

/// Label text for a primary gridline.
#[must_use]
pub(super) fn tier_label_text(
    tier: TimeTier,
    boundary: &Boundary,
    config: &TimelineConfig,
) -> Option<String> {
    let value = boundary.instant.to_naive()?;
    let text = match tier {
        TimeTier::Hours => hour_text(value, config.ampm),
        TimeTier::AmPm if value.hour() == 0 => {
            let text = month_day_text(value, config);
            if boundary.ordinal % AMPM_YEAR_EVERY == 0 {
                with_default_year(text, boundary.instant)
            } else {
                text
            }
        }
        TimeTier::AmPm => hour_text(value, config.ampm),
        TimeTier::Days | TimeTier::Weeks | TimeTier::Months => {
            let text = month_day_text(value, config);
            if boundary.ordinal % CALENDAR_YEAR_EVERY == 0 {
                with_default_year(text, boundary.instant)
            } else {
                text
            }
        }
        TimeTier::Years | TimeTier::Tens | TimeTier::Fifty | TimeTier::Hundred => {
            year_text(boundary.instant, DEFAULT_BCE_SUFFIX, DEFAULT_CE_SUFFIX)
        }
        TimeTier::FiveHundred | TimeTier::Thousand => {
            year_text(boundary.instant, &config.bce, &config.ce)
        }
    };
    Some(text)
}

/// `Weekday, Month D, YYYY` label shown on a point.
#[must_use]
pub(super) fn point_date_label(instant: Instant, config: &TimelineConfig) -> String {
    let Some(value) = instant.to_naive() else {
        return instant.to_string();
    };
    format!(
        "{}, {} {}, {}",
        day_name(value.weekday(), config.use_day_abbr),
        month_name(value.month(), config.use_month_abbr),
        value.day(),
        year_text(instant, DEFAULT_BCE_SUFFIX, DEFAULT_CE_SUFFIX)
    )
}
