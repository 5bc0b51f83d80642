//! Tolerant calendar-date parsing and era-aware printing.
//!
//! String inputs run through three rewriting stages before generic parsing:
//! a synthetic day for `Month YYYY`, a supplied year for `Month D` forms, and
//! era resolution for `AD`/`BC`/`BCE`/`CE` years. When generic parsing also
//! fails, the whole input is tried as a bare year.

use std::fmt::{self, Write as _};
use std::sync::LazyLock;

use chrono::format::{Item, StrftimeItems};
use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc, Weekday,
};
use regex::Regex;
use tracing::trace;

use crate::core::Instant;
use crate::error::{TimelineError, TimelineResult};

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
pub const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
pub const DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
pub const DAY_ABBR: [&str; 7] = ["Sun", "Mon", "Tues", "Wed", "Thurs", "Fri", "Sat"];

/// Medium date pattern used when callers do not supply one.
pub const DEFAULT_DATE_PATTERN: &str = "%b %-d, %-Y";
pub const DEFAULT_BCE_SUFFIX: &str = "BCE";
pub const DEFAULT_CE_SUFFIX: &str = "";

// Leap year, so Feb 29 survives generic parsing before the real year lands.
const ERA_PLACEHOLDER_YEAR: &str = "2000";

const TIME_FRAGMENT: &str =
    r"T?[0-9]{1,2}:[0-9]{2}(?::[0-9]{2})? ?(?:am|pm)?(?: [A-Z]{3})?";

fn month_alternation() -> String {
    MONTHS
        .iter()
        .chain(MONTH_ABBR.iter())
        .copied()
        .collect::<Vec<_>>()
        .join("|")
}

static MONTH_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)({}),? ([0-9]{{4}})", month_alternation()))
        .expect("month/year pattern compiles")
});

static MONTH_DAY_FORWARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<head>(?:{months}) ?(?:[0-9]{{1,2}})?),? ?(?:(?P<year>[0-9]{{1,4}})(?:\s+|$))?(?P<time>{time})?$",
        months = month_alternation(),
        time = TIME_FRAGMENT,
    ))
    .expect("forward month/day pattern compiles")
});

static MONTH_DAY_REVERSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<head>(?:[0-9]{{1,2}})? ?(?:{months})),? ?(?:(?P<year>[0-9]{{1,4}})(?:\s+|$))?(?P<time>{time})?$",
        months = month_alternation(),
        time = TIME_FRAGMENT,
    ))
    .expect("reverse month/day pattern compiles")
});

// `Sept.` is common in written dates; chrono only knows `Sep`.
static SEPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsept\b\.?").expect("sept pattern compiles"));

static ERA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?P<year>[0-9]{1,4}) ?(?P<era>A\.?D\.?|B\.?C\.?E\.?|B\.?C\.?|C\.?E\.?)")
        .expect("era pattern compiles")
});

static ZONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<rest>.+?)(?:\s+(?P<abbr>UTC|GMT|EST|EDT|CST|CDT|MST|MDT|PST|PDT)|(?P<zulu>[0-9])Z)$",
    )
    .expect("zone pattern compiles")
});

static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:sun|mon|tue|wed|thu|fri|sat)[a-z]*\.?,?\s+")
        .expect("weekday pattern compiles")
});

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<date>.*?)[T\s]+(?P<clock>[0-9]{1,2}:[0-9]{2}(?::[0-9]{2}(?:\.[0-9]{1,9})?)?)\s*(?P<meridiem>am|pm|a\.m\.|p\.m\.)?$",
    )
    .expect("time pattern compiles")
});

static ISO_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("iso year pattern compiles"));

static ISO_YEAR_MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<year>[0-9]{4})-(?P<month>[0-9]{1,2})$").expect("iso month pattern compiles")
});

const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B, %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%B %d,%Y",
];

const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Any value the normalizer can turn into an [`Instant`].
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Free-form text such as `"March 2020"` or `"44 BC"`.
    Text(String),
    /// Native calendar value, interpreted as UTC.
    Native(NaiveDateTime),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    /// An already-normalized value.
    Instant(Instant),
    /// January 1 of the given (possibly negative) year.
    Year(i32),
}

impl DateInput {
    #[must_use]
    pub fn year(year: i32) -> Self {
        Self::Year(year)
    }
}

impl fmt::Display for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Native(value) => write!(f, "{value}"),
            Self::Timestamp(millis) => write!(f, "{millis}ms"),
            Self::Instant(instant) => write!(f, "{instant}"),
            Self::Year(year) => write!(f, "year {year}"),
        }
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for DateInput {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Instant> for DateInput {
    fn from(value: Instant) -> Self {
        Self::Instant(value)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::Native(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        Self::Native(value.and_time(NaiveTime::MIN))
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Native(value.naive_utc())
    }
}

/// Parses loosely formatted, possibly BCE, dates into [`Instant`]s.
///
/// Text without a year takes the reference year, which defaults to the
/// current UTC year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateNormalizer {
    reference_year: Option<i32>,
}

impl DateNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the year supplied to year-less inputs such as `"March 15"`.
    #[must_use]
    pub fn with_reference_year(year: i32) -> Self {
        Self {
            reference_year: Some(year),
        }
    }

    #[must_use]
    pub fn reference_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(|| Utc::now().year())
    }

    pub fn normalize(&self, input: impl Into<DateInput>) -> TimelineResult<Instant> {
        let input = input.into();
        let resolved = match &input {
            DateInput::Instant(instant) => Some(*instant),
            DateInput::Timestamp(millis) => Some(Instant::from_millis(*millis)),
            DateInput::Native(value) => Some(Instant::from_naive(*value)),
            DateInput::Year(year) => Instant::from_ymd(*year, 1, 1),
            DateInput::Text(text) => self.normalize_text(text),
        };

        resolved.ok_or_else(|| TimelineError::InvalidDate {
            input: input.to_string(),
        })
    }

    fn normalize_text(&self, text: &str) -> Option<Instant> {
        let text = text.trim();
        let staged = insert_missing_day(&SEPT_RE.replace_all(text, "Sep"));
        let staged = insert_missing_year(&staged, self.reference_year());
        trace!(input = text, staged = %staged, "normalizing date text");

        if let Some(value) = resolve_era(&staged) {
            return Some(Instant::from_naive(value));
        }
        if let Some(value) = parse_generic(&staged) {
            return Some(Instant::from_naive(value));
        }
        parse_bare_year(&staged)
    }
}

/// Rewrites `Month YYYY` into `Month 1, YYYY`.
///
/// A month already preceded by a day number is left alone.
#[must_use]
pub fn insert_missing_day(text: &str) -> String {
    let Some(caps) = MONTH_YEAR_RE.captures(text) else {
        return text.to_owned();
    };
    let Some(whole) = caps.get(0) else {
        return text.to_owned();
    };
    let preceded_by_day = text[..whole.start()]
        .trim_end()
        .ends_with(|ch: char| ch.is_ascii_digit());
    if preceded_by_day {
        return text.to_owned();
    }

    format!(
        "{}{} 1, {}{}",
        &text[..whole.start()],
        &caps[1],
        &caps[2],
        &text[whole.end()..]
    )
}

/// Rewrites month/day forms into `Month D, YYYY CE [time]`.
///
/// A missing year becomes `reference_year`; a present one is zero-padded to
/// four digits and pinned with a `CE` marker so short years are not
/// reinterpreted by generic parsing.
#[must_use]
pub fn insert_missing_year(text: &str, reference_year: i32) -> String {
    let Some(caps) = MONTH_DAY_FORWARD_RE
        .captures(text)
        .or_else(|| MONTH_DAY_REVERSE_RE.captures(text))
    else {
        return text.to_owned();
    };

    let head = caps.name("head").map_or("", |m| m.as_str());
    let year = match caps.name("year") {
        Some(year) => format!("{:0>4} CE", year.as_str()),
        None => reference_year.to_string(),
    };
    match caps.name("time") {
        Some(time) => format!("{head}, {year} {}", time.as_str()),
        None => format!("{head}, {year}"),
    }
}

fn resolve_era(text: &str) -> Option<NaiveDateTime> {
    let caps = ERA_RE.captures(text)?;
    let digits = caps.name("year")?.as_str();
    let era = caps.name("era")?.as_str();
    let numeral: i32 = digits.parse().ok()?;
    let year = if era.starts_with(['b', 'B']) {
        -numeral
    } else {
        numeral
    };

    let placeholder = ERA_RE.replace(text, ERA_PLACEHOLDER_YEAR);
    let parsed = parse_generic(&insert_missing_day(&placeholder))?;
    with_year_rollover(parsed, year)
}

/// Sets the year, moving a Feb 29 that the target year lacks to Mar 1.
fn with_year_rollover(value: NaiveDateTime, year: i32) -> Option<NaiveDateTime> {
    value.with_year(year).or_else(|| {
        NaiveDate::from_ymd_opt(year, 3, 1).map(|date| date.and_time(value.time()))
    })
}

fn parse_bare_year(text: &str) -> Option<Instant> {
    let year: i32 = text.trim().parse().ok()?;
    Instant::from_ymd(year, 1, 1)
}

/// Generic string-to-date parsing used after the rewriting stages.
///
/// Text without a zone is read as UTC.
#[must_use]
pub fn parse_generic(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(value.naive_utc());
    }
    if let Ok(value) = DateTime::parse_from_rfc2822(text) {
        return Some(value.naive_utc());
    }

    let (text, offset_minutes) = split_zone(text);
    let text = WEEKDAY_RE.replace(text.trim(), "");
    let (date_text, time) = match TIME_RE.captures(&text) {
        Some(caps) => {
            let clock = caps.name("clock")?.as_str();
            let meridiem = caps.name("meridiem").map(|m| m.as_str());
            let time = parse_clock(clock, meridiem)?;
            (caps.name("date")?.as_str().to_owned(), time)
        }
        None => (text.into_owned(), NaiveTime::MIN),
    };

    let date = parse_calendar_date(date_text.trim().trim_end_matches(','))?;
    let local = date.and_time(time);
    local.checked_sub_signed(TimeDelta::minutes(offset_minutes))
}

fn split_zone(text: &str) -> (String, i64) {
    let Some(caps) = ZONE_RE.captures(text) else {
        return (text.to_owned(), 0);
    };
    let rest = caps.name("rest").map_or("", |m| m.as_str());
    if let Some(digit) = caps.name("zulu") {
        return (format!("{rest}{}", digit.as_str()), 0);
    }
    let offset_hours = match caps
        .name("abbr")
        .map(|m| m.as_str().to_ascii_uppercase())
        .as_deref()
    {
        Some("EST") | Some("CDT") => -5,
        Some("EDT") => -4,
        Some("CST") | Some("MDT") => -6,
        Some("MST") | Some("PDT") => -7,
        Some("PST") => -8,
        _ => 0,
    };
    (rest.to_owned(), offset_hours * 60)
}

fn parse_clock(clock: &str, meridiem: Option<&str>) -> Option<NaiveTime> {
    let time = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(clock, format).ok())?;
    let Some(meridiem) = meridiem else {
        return Some(time);
    };
    let hour = time.hour();
    if !(1..=12).contains(&hour) {
        return None;
    }
    let is_pm = meridiem.starts_with(['p', 'P']);
    let hour = (hour % 12) + if is_pm { 12 } else { 0 };
    time.with_hour(hour)
}

fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    if ISO_YEAR_RE.is_match(text) {
        let year: i32 = text.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    if let Some(caps) = ISO_YEAR_MONTH_RE.captures(text) {
        let year: i32 = caps["year"].parse().ok()?;
        let month: u32 = caps["month"].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    {
        return Some(date);
    }

    // Month and year only: the first of that month.
    let with_day = format!("1 {text}");
    ["%d %B, %Y", "%d %B %Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&with_day, format).ok())
}

/// Prints `instant` with a strftime `pattern`, writing negative years as
/// their absolute value followed by `bce_suffix` (and positive years
/// followed by `ce_suffix`). Returns `None` for unrepresentable instants or
/// malformed patterns.
#[must_use]
pub fn format_instant(
    instant: Instant,
    pattern: &str,
    bce_suffix: &str,
    ce_suffix: &str,
) -> Option<String> {
    let value = instant.to_naive()?;
    let year = value.year();
    let is_bce = year < 0;
    let display = if is_bce {
        with_year_rollover(value, year.abs())?
    } else {
        value
    };

    let suffix = if is_bce { bce_suffix } else { ce_suffix };
    let pattern = insert_year_suffix(&unpadded_year(pattern), suffix);
    if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
        return None;
    }

    let mut out = String::new();
    write!(out, "{}", display.format(&pattern)).ok()?;
    Some(out.trim().to_owned())
}

/// Rewrites `%Y` as `%-Y` so short years print without zero padding.
fn unpadded_year(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 1);
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        out.push(ch);
        if ch != '%' {
            continue;
        }
        match chars.next() {
            Some('Y') => out.push_str("-Y"),
            Some(next) => out.push(next),
            None => {}
        }
    }
    out
}

fn insert_year_suffix(pattern: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return pattern.to_owned();
    }
    let Some(year_end) = pattern.find("%-Y").map(|index| index + 3) else {
        return pattern.to_owned();
    };

    format!(
        "{} {}{}",
        &pattern[..year_end],
        suffix.replace('%', "%%"),
        &pattern[year_end..]
    )
}

/// Month name for a 1-based month number.
#[must_use]
pub fn month_name(month: u32, abbreviated: bool) -> &'static str {
    let index = (month.clamp(1, 12) - 1) as usize;
    if abbreviated {
        MONTH_ABBR[index]
    } else {
        MONTHS[index]
    }
}

#[must_use]
pub fn day_name(weekday: Weekday, abbreviated: bool) -> &'static str {
    let index = weekday.num_days_from_sunday() as usize;
    if abbreviated {
        DAY_ABBR[index]
    } else {
        DAYS[index]
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DateNormalizer, format_instant, insert_missing_day, insert_missing_year, parse_generic,
    };
    use crate::core::Instant;
    use chrono::{Datelike, Timelike};

    #[test]
    fn missing_day_is_inserted_for_month_year_forms() {
        assert_eq!(insert_missing_day("March 2020"), "March 1, 2020");
        assert_eq!(insert_missing_day("mar, 2020"), "mar 1, 2020");
        assert_eq!(insert_missing_day("March 15, 2020"), "March 15, 2020");
        assert_eq!(insert_missing_day("1 March 2020"), "1 March 2020");
    }

    #[test]
    fn missing_year_uses_reference_year() {
        assert_eq!(insert_missing_year("March 15", 2031), "March 15, 2031");
        assert_eq!(insert_missing_year("15 March", 2031), "15 March, 2031");
        assert_eq!(
            insert_missing_year("March 15, 44", 2031),
            "March 15, 0044 CE"
        );
        assert_eq!(
            insert_missing_year("March 15 10:30 am", 2031),
            "March 15, 2031 10:30 am"
        );
    }

    #[test]
    fn generic_parser_reads_times_and_zones() {
        let value = parse_generic("March 15, 2000 10:30 pm EST").expect("parse");
        assert_eq!(value.hour(), 3);
        assert_eq!(value.day(), 16);

        let iso = parse_generic("2020-03-01T10:00Z").expect("iso");
        assert_eq!(iso.hour(), 10);
    }

    #[test]
    fn era_year_overwrites_placeholder() {
        let normalizer = DateNormalizer::with_reference_year(2024);
        let instant = normalizer.normalize("March 15, 44 BC").expect("bce date");
        let value = instant.to_naive().expect("naive");
        assert_eq!(value.year(), -44);
        assert_eq!(value.month(), 3);
        assert_eq!(value.day(), 15);
    }

    #[test]
    fn leap_day_rolls_over_in_common_era_years() {
        let normalizer = DateNormalizer::with_reference_year(2024);
        let instant = normalizer.normalize("February 29, 3 BC").expect("rolled");
        let value = instant.to_naive().expect("naive");
        assert_eq!((value.year(), value.month(), value.day()), (-3, 3, 1));
    }

    #[test]
    fn malformed_pattern_does_not_panic() {
        let instant = Instant::from_ymd(2020, 1, 1).expect("instant");
        assert!(format_instant(instant, "%Q", "BCE", "").is_none());
    }
}
