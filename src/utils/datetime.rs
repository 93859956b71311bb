//! Date and time utility functions for route schedules
//!
//! Route departures and arrivals are typed as two localized fields, a date in
//! `DD/MM/AAAA` and a time in `HH:MM`, which are combined into a single
//! `"DD/MM/AAAA HH:MM"` string before any parsing happens. The backend stores
//! `YYYY-MM-DD HH:MM` in local wall-clock time.
//!
//! Every function here is total. Input that cannot be understood degrades to an
//! empty string, `None` or zero, because these helpers run on every keystroke of
//! a form where half-typed values are the norm.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR};

/// Localized date format shown in the route form
pub const LOCAL_DATE_FORMAT: &str = "%d/%m/%Y";

/// Localized time format shown in the route form
pub const LOCAL_TIME_FORMAT: &str = "%H:%M";

/// Date-time format understood by the `routes` table
pub const STORAGE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format of the legacy time-only columns (`departure_time`, `arrival_time`)
pub const LEGACY_TIME_FORMAT: &str = "%H:%M:%S";

const DATE_MASK_DIGITS: usize = 8;
const TIME_MASK_DIGITS: usize = 4;

/// Naive formats tried after RFC 3339 / RFC 2822 when resolving arbitrary strings.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Inclusive range of years accepted by [`validate_date_field`].
///
/// This is a business guard against typos (`20225`, `2052`), not a calendar limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_YEAR, DEFAULT_MAX_YEAR)
    }
}

/// A date field and a time field as the user sees them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedDateTime {
    pub date: String,
    pub time: String,
}

impl LocalizedDateTime {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }

    /// Render a resolved instant back into form fields
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self {
            date: dt.format(LOCAL_DATE_FORMAT).to_string(),
            time: dt.format(LOCAL_TIME_FORMAT).to_string(),
        }
    }

    /// True when nothing could be recovered (see [`split_date_time`])
    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.time.is_empty()
    }

    /// Combined `"DD/MM/AAAA HH:MM"` form, or `""` while either half is missing
    pub fn combined(&self) -> String {
        compose_date_time(&self.date, &self.time)
    }

    /// Both halves present and individually valid
    pub fn is_complete(&self, years: &YearRange) -> bool {
        validate_date_field(&self.date, years) && validate_time_field(&self.time)
    }
}

/// Reshape typed text into a progressive `DD/MM/AAAA` pattern.
///
/// Non-digits are dropped and at most eight digits are kept. Separators are only
/// inserted in front of a digit, so `"2512"` stays `"25/12"` rather than `"25/12/"`.
pub fn apply_date_mask(input: &str) -> String {
    mask_digits(input, DATE_MASK_DIGITS, &[2, 4], '/')
}

/// Reshape typed text into a progressive `HH:MM` pattern (at most four digits).
pub fn apply_time_mask(input: &str) -> String {
    mask_digits(input, TIME_MASK_DIGITS, &[2], ':')
}

fn mask_digits(input: &str, max_digits: usize, breaks: &[usize], separator: char) -> String {
    let mut masked = String::with_capacity(max_digits + breaks.len());
    for (i, c) in input.chars().filter(char::is_ascii_digit).take(max_digits).enumerate() {
        if breaks.contains(&i) {
            masked.push(separator);
        }
        masked.push(c);
    }
    masked
}

/// Combine the two form fields into `"{date} {time}"`.
///
/// Returns `""` unless both fields are non-empty after trimming.
pub fn compose_date_time(date: &str, time: &str) -> String {
    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() || time.is_empty() {
        return String::new();
    }
    format!("{} {}", date, time)
}

/// Parse a combined string against the current local time.
///
/// See [`parse_date_time_at`].
pub fn parse_date_time(combined: &str) -> Option<NaiveDateTime> {
    parse_date_time_at(combined, Local::now().naive_local())
}

/// Parse a combined string, resolving time-only input against `now`.
///
/// Two shapes are accepted:
/// * `DD/MM/AAAA HH:MM`, which must name a real calendar date and time.
/// * `H:MM` or `HH:MM`, which means the next occurrence of that time: today if it
///   is still ahead of `now`, otherwise tomorrow.
///
/// Anything else yields `None`.
pub fn parse_date_time_at(combined: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    if let Some((date, time)) = split_on_whitespace(combined) {
        let (day, month, year) = date_fields(date)?;
        let (hour, minute) = time_fields(time, 2)?;
        return NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0);
    }

    let (hour, minute) = time_fields(combined, 1)?;
    let candidate = now.date().and_time(NaiveTime::from_hms_opt(hour, minute, 0)?);
    if candidate <= now {
        Some(candidate + Duration::days(1))
    } else {
        Some(candidate)
    }
}

/// Recover the two form fields from a stored or combined value.
///
/// Tries, in order, the localized `DD/MM/AAAA HH:MM` form, the storage form
/// `YYYY-MM-DD[ T]HH:MM[:SS][Z|±HH:MM]` (wall-clock fields kept as written), and
/// finally any date string [`parse_platform`] understands. An empty pair means
/// nothing displayable could be recovered.
pub fn split_date_time(combined: &str) -> LocalizedDateTime {
    let input = combined.trim();

    if let Some((date, time)) = split_on_whitespace(input) {
        if date_fields(date).is_some() && time_fields(time, 2).is_some() {
            return LocalizedDateTime::new(date, time);
        }
    }

    if let Some([year, month, day, hour, minute]) = storage_fields(input) {
        return LocalizedDateTime::new(format!("{}/{}/{}", day, month, year), format!("{}:{}", hour, minute));
    }

    parse_platform(input)
        .map(LocalizedDateTime::from_naive)
        .unwrap_or_default()
}

/// Convert a combined localized string to `YYYY-MM-DD HH:MM`.
///
/// When the input does not parse it is returned unchanged; callers validate first.
pub fn to_storage_date_time(combined: &str) -> String {
    to_storage_date_time_at(combined, Local::now().naive_local())
}

/// [`to_storage_date_time`] with an explicit reference instant for time-only input
pub fn to_storage_date_time_at(combined: &str, now: NaiveDateTime) -> String {
    match parse_date_time_at(combined, now) {
        Some(dt) => dt.format(STORAGE_DATETIME_FORMAT).to_string(),
        None => combined.to_string(),
    }
}

/// Resolve a value that may be localized, storage-formatted or platform-native.
pub fn to_safe_date(input: &str) -> Option<NaiveDateTime> {
    to_safe_date_at(input, Local::now().naive_local())
}

/// [`to_safe_date`] with an explicit reference instant.
///
/// Strategies, first success wins: combined-string parsing, platform parsing,
/// ISO normalization (space becomes `T`, `:00` appended when seconds are
/// missing), then field reconstruction from [`split_date_time`].
pub fn to_safe_date_at(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    if input.is_empty() {
        return None;
    }

    parse_date_time_at(input, now)
        .or_else(|| parse_platform(input))
        .or_else(|| parse_normalized_iso(input))
        .or_else(|| {
            let fields = split_date_time(input);
            let (day, month, year) = date_fields(&fields.date)?;
            let (hour, minute) = time_fields(&fields.time, 2)?;
            NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
        })
}

/// `HH:MM:SS` for the legacy time-only columns, if the value resolves at all
pub fn to_legacy_time(input: &str) -> Option<String> {
    to_safe_date(input).map(|dt| dt.format(LEGACY_TIME_FORMAT).to_string())
}

/// True iff `date` is `DD/MM/AAAA` with day 1-31, month 1-12 and year in `years`.
///
/// Only ranges are checked; `31/02/2025` passes here and is rejected later by
/// [`parse_date_time`].
pub fn validate_date_field(date: &str, years: &YearRange) -> bool {
    match date_fields(date) {
        Some((day, month, year)) => (1..=31).contains(&day) && (1..=12).contains(&month) && years.contains(year),
        None => false,
    }
}

/// True iff `time` is `HH:MM` with hour 0-23 and minute 0-59
pub fn validate_time_field(time: &str) -> bool {
    matches!(time_fields(time, 2), Some((hour, minute)) if hour <= 23 && minute <= 59)
}

/// Human-readable trip duration, e.g. `"2h 15min"` or `"45min"`.
///
/// Empty when either endpoint fails to parse or arrival is not after departure.
pub fn compute_duration_label(departure: &str, arrival: &str) -> String {
    compute_duration_label_at(departure, arrival, Local::now().naive_local())
}

pub fn compute_duration_label_at(departure: &str, arrival: &str, now: NaiveDateTime) -> String {
    trip_minutes(departure, arrival, now)
        .map(format_duration)
        .unwrap_or_default()
}

/// Whole minutes between departure and arrival, 0 when undefined
pub fn compute_duration_minutes(departure: &str, arrival: &str) -> i64 {
    compute_duration_minutes_at(departure, arrival, Local::now().naive_local())
}

pub fn compute_duration_minutes_at(departure: &str, arrival: &str, now: NaiveDateTime) -> i64 {
    trip_minutes(departure, arrival, now).unwrap_or(0)
}

/// Render a whole-minute duration as `"{H}h {M}min"`, or `"{M}min"` under an hour
pub fn format_duration(total_minutes: i64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{}h {}min", hours, minutes)
    } else {
        format!("{}min", minutes)
    }
}

fn trip_minutes(departure: &str, arrival: &str, now: NaiveDateTime) -> Option<i64> {
    let departure = parse_date_time_at(departure, now)?;
    let arrival = parse_date_time_at(arrival, now)?;
    if arrival <= departure {
        return None;
    }
    Some((arrival - departure).num_minutes())
}

/// Parse date strings the way a general-purpose date parser would.
///
/// Offsets are converted to local time; naive values are taken as local already.
/// A bare `YYYY-MM-DD` resolves to local midnight.
fn parse_platform(input: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Some(dt) = parse_zoned_without_seconds(input) {
        return Some(dt);
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `YYYY-MM-DDTHH:MM` directly followed by `Z` or a `±HH:MM` offset.
fn parse_zoned_without_seconds(input: &str) -> Option<NaiveDateTime> {
    let normalized = input.trim().replacen(' ', "T", 1);
    if normalized.len() <= 16 || !normalized.is_char_boundary(16) {
        return None;
    }

    let (stamp, zone) = normalized.split_at(16);
    if !matches!(zone.as_bytes().first(), Some(b'Z' | b'z' | b'+' | b'-')) {
        return None;
    }
    DateTime::parse_from_rfc3339(&format!("{}:00{}", stamp, zone))
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

fn parse_normalized_iso(input: &str) -> Option<NaiveDateTime> {
    let normalized = input.replacen(' ', "T", 1);
    let bytes = normalized.as_bytes();
    let missing_seconds = bytes.len() >= 6 && {
        let tail = &bytes[bytes.len() - 6..];
        tail[0] == b'T'
            && tail[1].is_ascii_digit()
            && tail[2].is_ascii_digit()
            && tail[3] == b':'
            && tail[4].is_ascii_digit()
            && tail[5].is_ascii_digit()
    };

    if missing_seconds {
        parse_platform(&format!("{}:00", normalized))
    } else {
        parse_platform(&normalized)
    }
}

/// Split at the first whitespace character, consuming exactly that character.
fn split_on_whitespace(input: &str) -> Option<(&str, &str)> {
    let idx = input.find(char::is_whitespace)?;
    let (head, rest) = input.split_at(idx);
    let separator = rest.chars().next()?;
    Some((head, &rest[separator.len_utf8()..]))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn number(s: &str) -> Option<u32> {
    if all_digits(s) {
        s.parse().ok()
    } else {
        None
    }
}

/// `DD/MM/AAAA` positional fields as (day, month, year), no range checks
fn date_fields(date: &str) -> Option<(u32, u32, i32)> {
    let mut parts = date.split('/');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || day.len() != 2 || month.len() != 2 || year.len() != 4 {
        return None;
    }
    Some((number(day)?, number(month)?, i32::try_from(number(year)?).ok()?))
}

/// `HH:MM` positional fields; the hour may be one digit when `min_hour_digits` is 1
fn time_fields(time: &str, min_hour_digits: usize) -> Option<(u32, u32)> {
    let (hour, minute) = time.split_once(':')?;
    if !(min_hour_digits..=2).contains(&hour.len()) || minute.len() != 2 {
        return None;
    }
    Some((number(hour)?, number(minute)?))
}

/// Raw `[year, month, day, hour, minute]` slices of a storage-form string
fn storage_fields(input: &str) -> Option<[&str; 5]> {
    if !input.is_ascii() || input.len() < 16 {
        return None;
    }
    let b = input.as_bytes();
    if b[4] != b'-' || b[7] != b'-' || !matches!(b[10], b' ' | b'T') || b[13] != b':' {
        return None;
    }

    let fields = [&input[0..4], &input[5..7], &input[8..10], &input[11..13], &input[14..16]];
    if !fields.iter().all(|f| all_digits(f)) {
        return None;
    }

    let mut rest = &input[16..];
    if let Some(seconds) = rest.strip_prefix(':') {
        if seconds.len() < 2 || !all_digits(&seconds[..2]) {
            return None;
        }
        rest = &seconds[2..];
    }

    let zone_ok = rest.is_empty()
        || rest == "Z"
        || (rest.len() == 6
            && matches!(rest.as_bytes()[0], b'+' | b'-')
            && all_digits(&rest[1..3])
            && rest.as_bytes()[3] == b':'
            && all_digits(&rest[4..6]));

    zone_ok.then_some(fields)
}
