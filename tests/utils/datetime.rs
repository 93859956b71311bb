use agtur_admin::utils::datetime::*;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

#[test]
fn test_validate_date_field_accepts_every_in_range_date() {
    let years = YearRange::default();
    for year in 2024..=2035 {
        for month in 1..=12 {
            for day in 1..=31 {
                let date = format!("{:02}/{:02}/{}", day, month, year);
                assert!(validate_date_field(&date, &years), "{} should be valid", date);
            }
        }
    }
}

#[test]
fn test_validate_date_field_rejects_bad_input() {
    let years = YearRange::default();
    for date in [
        "",
        "1/12/2025",
        "00/12/2025",
        "32/12/2025",
        "25/00/2025",
        "25/13/2025",
        "25/12/2023",
        "25/12/2036",
        "25-12-2025",
        "25/12/25",
        "25/12/2025 ",
        "ab/cd/efgh",
    ] {
        assert!(!validate_date_field(date, &years), "{:?} should be invalid", date);
    }
}

#[test]
fn test_validate_date_field_uses_configured_years() {
    let years = YearRange::new(2020, 2022);
    assert!(validate_date_field("01/01/2021", &years));
    assert!(!validate_date_field("01/01/2025", &years));
}

#[test]
fn test_validate_time_field() {
    for hour in 0..=23 {
        for minute in 0..=59 {
            let time = format!("{:02}:{:02}", hour, minute);
            assert!(validate_time_field(&time), "{} should be valid", time);
        }
    }
    for time in ["", "24:00", "12:60", "9:30", "12:3", "12-30", "1230", "12:30:00"] {
        assert!(!validate_time_field(time), "{:?} should be invalid", time);
    }
}

#[test]
fn test_apply_date_mask() {
    assert_eq!(apply_date_mask("25122025"), "25/12/2025");
    assert_eq!(apply_date_mask("2512"), "25/12");
    assert_eq!(apply_date_mask("251"), "25/1");
    assert_eq!(apply_date_mask("2"), "2");
    assert_eq!(apply_date_mask(""), "");
    assert_eq!(apply_date_mask("25/12/2025"), "25/12/2025");
    assert_eq!(apply_date_mask("2512202599"), "25/12/2025");
    assert_eq!(apply_date_mask("ab25-12x"), "25/12");
}

#[test]
fn test_apply_time_mask() {
    assert_eq!(apply_time_mask("1430"), "14:30");
    assert_eq!(apply_time_mask("143"), "14:3");
    assert_eq!(apply_time_mask("14"), "14");
    assert_eq!(apply_time_mask("14:30:15"), "14:30");
    assert_eq!(apply_time_mask("h"), "");
}

#[test]
fn test_compose_date_time() {
    assert_eq!(compose_date_time("25/12/2025", "14:30"), "25/12/2025 14:30");
    assert_eq!(compose_date_time("  25/12/2025 ", " 14:30 "), "25/12/2025 14:30");
    assert_eq!(compose_date_time("", "14:30"), "");
    assert_eq!(compose_date_time("25/12/2025", "   "), "");
}

#[test]
fn test_parse_full_form() {
    let now = at(2025, 1, 1, 12, 0);
    assert_eq!(parse_date_time_at("25/12/2025 14:30", now), Some(at(2025, 12, 25, 14, 30)));
    assert_eq!(parse_date_time_at("01/01/2030 00:00", now), Some(at(2030, 1, 1, 0, 0)));
    assert_eq!(parse_date_time("25/12/2025 14:30"), Some(at(2025, 12, 25, 14, 30)));
}

#[test]
fn test_parse_rejects_malformed_input() {
    let now = at(2025, 1, 1, 12, 0);
    for input in [
        "31/31/2025 99:99",
        "31/02/2025 10:00",
        "25/12/2025 24:00",
        "25/12/2025  14:30",
        "25/12/2025",
        "2025-12-25 14:30",
        "25/12/2025 14h30",
        "",
        "tomorrow",
    ] {
        assert_eq!(parse_date_time_at(input, now), None, "{:?} should not parse", input);
    }
}

#[test]
fn test_parse_time_only_later_today() {
    let now = at(2025, 12, 25, 22, 0);
    assert_eq!(parse_date_time_at("23:00", now), Some(at(2025, 12, 25, 23, 0)));
}

#[test]
fn test_parse_time_only_rolls_to_tomorrow() {
    let now = at(2025, 12, 25, 23, 30);
    assert_eq!(parse_date_time_at("23:00", now), Some(at(2025, 12, 26, 23, 0)));

    // The current minute has already started, so it means tomorrow.
    let now = at(2025, 12, 31, 22, 0);
    assert_eq!(parse_date_time_at("22:00", now), Some(at(2026, 1, 1, 22, 0)));
}

#[test]
fn test_parse_time_only_single_digit_hour() {
    let now = at(2025, 12, 25, 8, 0);
    assert_eq!(parse_date_time_at("9:05", now), Some(at(2025, 12, 25, 9, 5)));
    assert_eq!(parse_date_time_at("24:00", now), None);
    assert_eq!(parse_date_time_at("9:5", now), None);
}

#[test]
fn test_split_localized_form() {
    let split = split_date_time(" 25/12/2025 14:30 ");
    assert_eq!(split, LocalizedDateTime::new("25/12/2025", "14:30"));
}

#[test]
fn test_split_storage_forms_keep_wall_clock_fields() {
    for input in [
        "2025-12-25 14:30",
        "2025-12-25 14:30:59",
        "2025-12-25T14:30",
        "2025-12-25T14:30Z",
        "2025-12-25T14:30:00+03:00",
        "2025-12-25 14:30:00-03:00",
    ] {
        assert_eq!(
            split_date_time(input),
            LocalizedDateTime::new("25/12/2025", "14:30"),
            "{:?}",
            input
        );
    }
}

#[test]
fn test_split_falls_back_to_platform_parsing() {
    let input = "2025-12-25T14:30:00.000Z";
    let expected = DateTime::parse_from_rfc3339(input)
        .unwrap()
        .with_timezone(&Local)
        .naive_local();
    assert_eq!(split_date_time(input), LocalizedDateTime::from_naive(expected));
}

#[test]
fn test_split_unrecoverable_is_empty() {
    assert!(split_date_time("").is_empty());
    assert!(split_date_time("not a date").is_empty());
    assert!(split_date_time("99/99").is_empty());
}

#[test]
fn test_split_compose_round_trip() {
    for input in ["25/12/2025 14:30", "2025-12-25 14:30:00", "2031-02-01T06:05Z", "01/01/2024 00:00"] {
        let first = split_date_time(input);
        let again = split_date_time(&compose_date_time(&first.date, &first.time));
        assert_eq!(first, again, "{:?}", input);
        assert!(!again.is_empty());
    }
}

#[test]
fn test_to_storage_date_time() {
    let now = at(2025, 1, 1, 12, 0);
    assert_eq!(to_storage_date_time("25/12/2025 14:30"), "2025-12-25 14:30");
    assert_eq!(to_storage_date_time("05/03/2026 07:09"), "2026-03-05 07:09");
    assert_eq!(to_storage_date_time_at("13:15", now), "2025-01-01 13:15");
    assert_eq!(to_storage_date_time_at("11:15", now), "2025-01-02 11:15");
}

#[test]
fn test_to_storage_date_time_returns_input_when_unparseable() {
    assert_eq!(to_storage_date_time("31/31/2025 99:99"), "31/31/2025 99:99");
    assert_eq!(to_storage_date_time(""), "");
}

#[test]
fn test_storage_conversion_is_lossless() {
    let localized = "07/08/2027 09:45";
    let storage = to_storage_date_time(localized);
    assert_eq!(storage, "2027-08-07 09:45");
    assert_eq!(split_date_time(&storage).combined(), localized);
}

#[test]
fn test_to_safe_date_strategies() {
    let now = at(2025, 1, 1, 12, 0);
    let expected = Some(at(2025, 12, 25, 14, 30));

    assert_eq!(to_safe_date_at("25/12/2025 14:30", now), expected);
    assert_eq!(to_safe_date_at("2025-12-25 14:30", now), expected);
    assert_eq!(to_safe_date_at("2025-12-25T14:30", now), expected);
    assert_eq!(to_safe_date_at("2025-12-25 14:30:00", now), expected);
    assert_eq!(to_safe_date_at("13:00", now), Some(at(2025, 1, 1, 13, 0)));
}

#[test]
fn test_to_safe_date_converts_zoned_values_with_or_without_seconds() {
    let now = at(2025, 1, 1, 12, 0);
    let local = |s: &str| Some(DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Local).naive_local());

    let utc = local("2025-12-25T14:30:00Z");
    assert_eq!(to_safe_date_at("2025-12-25T14:30:00Z", now), utc);
    assert_eq!(to_safe_date_at("2025-12-25T14:30Z", now), utc);
    assert_eq!(to_safe_date_at("2025-12-25 14:30Z", now), utc);

    let plus_three = local("2025-12-25T14:30:00+03:00");
    assert_eq!(to_safe_date_at("2025-12-25T14:30:00+03:00", now), plus_three);
    assert_eq!(to_safe_date_at("2025-12-25T14:30+03:00", now), plus_three);
    assert_eq!(to_safe_date_at("2025-12-25T14:30-03:00", now), local("2025-12-25T14:30:00-03:00"));
}

#[test]
fn test_to_safe_date_fails_only_when_every_strategy_fails() {
    let now = at(2025, 1, 1, 12, 0);
    assert_eq!(to_safe_date_at("", now), None);
    assert_eq!(to_safe_date_at("garbage", now), None);
    assert_eq!(to_safe_date_at("31/31/2025 99:99", now), None);
}

#[test]
fn test_to_legacy_time() {
    assert_eq!(to_legacy_time("2025-12-25 14:30").as_deref(), Some("14:30:00"));
    assert_eq!(to_legacy_time("25/12/2025 08:05").as_deref(), Some("08:05:00"));
    assert_eq!(to_legacy_time("nope"), None);
}

#[test]
fn test_compute_duration_label() {
    assert_eq!(compute_duration_label("25/12/2025 08:00", "25/12/2025 10:15"), "2h 15min");
    assert_eq!(compute_duration_label("25/12/2025 08:00", "25/12/2025 08:45"), "45min");
    assert_eq!(compute_duration_label("25/12/2025 08:00", "25/12/2025 09:00"), "1h 0min");
    assert_eq!(compute_duration_label("25/12/2025 22:00", "26/12/2025 06:30"), "8h 30min");
}

#[test]
fn test_compute_duration_label_empty_when_undefined() {
    assert_eq!(compute_duration_label("25/12/2025 10:00", "25/12/2025 09:00"), "");
    assert_eq!(compute_duration_label("25/12/2025 10:00", "25/12/2025 10:00"), "");
    assert_eq!(compute_duration_label("", "25/12/2025 10:00"), "");
    assert_eq!(compute_duration_label("31/31/2025 99:99", "25/12/2025 10:00"), "");
}

#[test]
fn test_compute_duration_minutes() {
    assert_eq!(compute_duration_minutes("25/12/2025 08:00", "25/12/2025 10:15"), 135);
    assert_eq!(compute_duration_minutes("25/12/2025 10:00", "25/12/2025 09:00"), 0);
    assert_eq!(compute_duration_minutes("invalid", "25/12/2025 09:00"), 0);
    assert_eq!(compute_duration_minutes("31/12/2025 23:00", "01/01/2026 01:30"), 150);
}

#[test]
fn test_duration_with_time_only_endpoints() {
    let now = at(2025, 12, 25, 7, 0);
    assert_eq!(compute_duration_label_at("08:00", "10:15", now), "2h 15min");
    assert_eq!(compute_duration_minutes_at("08:00", "10:15", now), 135);
    // 06:00 already passed, so departure moves to tomorrow and lands after arrival.
    assert_eq!(compute_duration_label_at("06:00", "10:15", now), "");
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0min");
    assert_eq!(format_duration(59), "59min");
    assert_eq!(format_duration(60), "1h 0min");
    assert_eq!(format_duration(1501), "25h 1min");
}

#[test]
fn test_localized_date_time_completeness() {
    let years = YearRange::default();
    assert!(LocalizedDateTime::new("25/12/2025", "14:30").is_complete(&years));
    assert!(!LocalizedDateTime::new("25/12/2025", "").is_complete(&years));
    assert!(!LocalizedDateTime::new("25/12", "14:30").is_complete(&years));
    assert_eq!(LocalizedDateTime::new("25/12/2025", "").combined(), "");
}
