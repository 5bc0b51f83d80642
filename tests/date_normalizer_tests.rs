use chrono::{Datelike, NaiveDate, Timelike};
use timeline_rs::TimelineError;
use timeline_rs::core::date_normalizer::DEFAULT_DATE_PATTERN;
use timeline_rs::core::{DateInput, DateNormalizer, Instant, format_instant};

fn normalizer() -> DateNormalizer {
    DateNormalizer::with_reference_year(2024)
}

#[test]
fn month_year_resolves_to_first_of_month() {
    let normalizer = normalizer();
    let short = normalizer.normalize("March 2020").expect("month year");
    let full = normalizer.normalize("March 1, 2020").expect("full date");
    assert_eq!(short, full);
    assert_eq!(short, Instant::from_ymd(2020, 3, 1).expect("expected"));
}

#[test]
fn abbreviated_and_reversed_month_forms_parse() {
    let normalizer = normalizer();
    let expected = Instant::from_ymd(2020, 12, 5).expect("expected");
    assert_eq!(normalizer.normalize("Dec 5, 2020").expect("abbr"), expected);
    assert_eq!(normalizer.normalize("5 December 2020").expect("reversed"), expected);
    assert_eq!(normalizer.normalize("December 5 2020").expect("no comma"), expected);
}

#[test]
fn bc_year_is_negative_and_prints_with_bce_suffix() {
    let instant = normalizer().normalize("100 BC").expect("bce year");
    assert_eq!(instant.year(), Some(-100));
    assert!(instant < Instant::EPOCH);

    let text = format_instant(instant, DEFAULT_DATE_PATTERN, "BCE", "").expect("format");
    assert_eq!(text, "Jan 1, 100 BCE");
}

#[test]
fn era_markers_accept_dotted_and_common_era_forms() {
    let normalizer = normalizer();
    assert_eq!(normalizer.normalize("44 B.C.").expect("dotted").year(), Some(-44));
    assert_eq!(normalizer.normalize("500 BCE").expect("bce").year(), Some(-500));
    assert_eq!(normalizer.normalize("476 AD").expect("ad").year(), Some(476));
    assert_eq!(normalizer.normalize("1066 CE").expect("ce").year(), Some(1066));
}

#[test]
fn month_with_short_era_year_starts_on_the_first() {
    let normalizer = normalizer();
    let ymd = |input: &str| {
        let value = normalizer
            .normalize(input)
            .expect("era date")
            .to_naive()
            .expect("naive");
        (value.year(), value.month(), value.day())
    };
    assert_eq!(ymd("March 44 BC"), (-44, 3, 1));
    assert_eq!(ymd("Jan 5 BC"), (-5, 1, 1));
    assert_eq!(ymd("March 500 BC"), (-500, 3, 1));
    assert_eq!(ymd("Nov 99 CE"), (99, 11, 1));
    assert_eq!(ymd("March 1500 BC"), (-1500, 3, 1));
    assert_eq!(ymd("March 15, 44 BC"), (-44, 3, 15));
}

#[test]
fn sept_is_accepted_for_september() {
    let normalizer = normalizer();
    let expected = Instant::from_ymd(2020, 9, 1).expect("expected");
    assert_eq!(normalizer.normalize("Sept 2020").expect("sept"), expected);
    assert_eq!(normalizer.normalize("Sept. 1, 2020").expect("dotted"), expected);
    assert_eq!(normalizer.normalize("September 2020").expect("full"), expected);
}

#[test]
fn short_years_with_month_are_not_reinterpreted() {
    let instant = normalizer().normalize("July 4, 76").expect("short year");
    let value = instant.to_naive().expect("naive");
    assert_eq!((value.year(), value.month(), value.day()), (76, 7, 4));
}

#[test]
fn year_less_dates_take_the_reference_year() {
    let instant = normalizer().normalize("June 21").expect("year-less");
    assert_eq!(instant, Instant::from_ymd(2024, 6, 21).expect("expected"));

    let normalizer = DateNormalizer::with_reference_year(1999);
    assert_eq!(normalizer.reference_year(), 1999);
    let instant = normalizer.normalize("21 June").expect("reversed year-less");
    assert_eq!(instant.year(), Some(1999));
}

#[test]
fn bare_and_negative_years_parse_as_january_first() {
    let normalizer = normalizer();
    assert_eq!(
        normalizer.normalize("1492").expect("iso year"),
        Instant::from_ymd(1492, 1, 1).expect("expected")
    );
    assert_eq!(
        normalizer.normalize("44").expect("two digit year"),
        Instant::from_ymd(44, 1, 1).expect("expected")
    );
    assert_eq!(
        normalizer.normalize("-500").expect("negative year"),
        Instant::from_ymd(-500, 1, 1).expect("expected")
    );
    assert_eq!(
        normalizer.normalize(DateInput::year(-3000)).expect("explicit year"),
        Instant::from_ymd(-3000, 1, 1).expect("expected")
    );
}

#[test]
fn clock_times_and_zones_shift_to_utc() {
    let instant = normalizer()
        .normalize("March 1, 2020 10:30 am EST")
        .expect("zoned time");
    let value = instant.to_naive().expect("naive");
    assert_eq!((value.hour(), value.minute()), (15, 30));

    let iso = normalizer()
        .normalize("2020-03-01T10:00:00+02:00")
        .expect("rfc3339");
    assert_eq!(iso.to_naive().expect("naive").hour(), 8);
}

#[test]
fn weekday_prefix_is_ignored() {
    let instant = normalizer()
        .normalize("Thursday, March 5, 2020")
        .expect("weekday prefixed");
    assert_eq!(instant, Instant::from_ymd(2020, 3, 5).expect("expected"));
}

#[test]
fn native_values_pass_through_as_utc() {
    let normalizer = normalizer();
    assert_eq!(normalizer.normalize(0_i64).expect("epoch"), Instant::EPOCH);
    assert_eq!(
        normalizer
            .normalize(86_400_000_i64)
            .expect("timestamp"),
        Instant::from_ymd(1970, 1, 2).expect("expected")
    );

    let date = NaiveDate::from_ymd_opt(1815, 6, 18).expect("date");
    assert_eq!(
        normalizer.normalize(date).expect("native date"),
        Instant::from_ymd(1815, 6, 18).expect("expected")
    );

    let instant = Instant::from_millis(-123_456);
    assert_eq!(normalizer.normalize(instant).expect("instant"), instant);
}

#[test]
fn unparseable_text_is_rejected_with_input() {
    let err = normalizer()
        .normalize("not a date")
        .expect_err("must reject");
    match err {
        TimelineError::InvalidDate { input } => assert_eq!(input, "not a date"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(normalizer().normalize("").is_err());
    assert!(normalizer().normalize("February 30, 2020").is_err());
}

#[test]
fn format_instant_appends_ce_suffix_when_configured() {
    let instant = Instant::from_ymd(2020, 3, 5).expect("instant");
    assert_eq!(
        format_instant(instant, DEFAULT_DATE_PATTERN, "BCE", "").as_deref(),
        Some("Mar 5, 2020")
    );
    assert_eq!(
        format_instant(instant, "%Y", "BC", "AD").as_deref(),
        Some("2020 AD")
    );
}

#[test]
fn format_instant_prints_short_years_without_padding() {
    let bce = Instant::from_ymd(-100, 1, 1).expect("instant");
    assert_eq!(
        format_instant(bce, "%Y", "BCE", "CE").as_deref(),
        Some("100 BCE")
    );
    let ce = Instant::from_ymd(76, 7, 4).expect("instant");
    assert_eq!(format_instant(ce, "%d/%m/%Y", "BCE", "").as_deref(), Some("04/07/76"));
    assert_eq!(format_instant(ce, "%%Y %Y", "BCE", "").as_deref(), Some("%Y 76"));
}
