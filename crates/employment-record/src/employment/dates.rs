//! Fractional-year arithmetic over calendar dates.
//!
//! Every year is normalized to 365 days: the raw day count between two dates
//! has each intervening February 29th removed before dividing. The result is
//! reproducible regardless of how many leap years a span crosses.

use chrono::{DateTime, Datelike, Local, NaiveDate};

pub const DAYS_PER_YEAR: f64 = 365.0;
pub const DEFAULT_DURATION_PRECISION: usize = 2;
/// Duration label used for employment without an end date.
pub const CURRENT_EMPLOYMENT_LABEL: &str = "Current";

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses `YYYY-MM-DD` date text, falling back to the calendar date of an
/// RFC 3339 timestamp.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

pub fn is_valid_date(raw: &str) -> bool {
    parse_calendar_date(raw).is_some()
}

/// True when the date lies strictly after `today`. Invalid dates are never in the future.
pub fn is_future_date(raw: &str, today: NaiveDate) -> bool {
    parse_calendar_date(raw).is_some_and(|date| date > today)
}

/// True when both dates parse and the end is on or after the start.
pub fn is_end_on_or_after_start(start: &str, end: &str) -> bool {
    match (parse_calendar_date(start), parse_calendar_date(end)) {
        (Some(start), Some(end)) => end >= start,
        _ => false,
    }
}

/// Number of February 29ths inside the inclusive range `[start, end]`.
pub fn count_leap_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let count = (start.year()..=end.year())
        .filter_map(|year| NaiveDate::from_ymd_opt(year, 2, 29))
        .filter(|leap_day| *leap_day >= start && *leap_day <= end)
        .count();
    count as u32
}

/// Years elapsed between two dates, excluding leap days. Zero when `start` is after `end`.
pub fn years_between(start: NaiveDate, end: NaiveDate) -> f64 {
    if start > end {
        return 0.0;
    }

    let total_days = (end - start).num_days();
    let adjusted_days = total_days - i64::from(count_leap_days(start, end));
    (adjusted_days as f64 / DAYS_PER_YEAR).max(0.0)
}

/// [`years_between`] over date text; a missing end date means today.
pub fn years_difference(start: &str, end: Option<&str>) -> f64 {
    years_difference_as_of(start, end, today())
}

pub fn years_difference_as_of(start: &str, end: Option<&str>, today: NaiveDate) -> f64 {
    match resolve_span(start, end, today) {
        Some((start, end)) => years_between(start, end),
        None => 0.0,
    }
}

/// Display text for an employment span: `"Current"` when there is no end date,
/// otherwise the fixed-point year count.
pub fn format_duration(start: &str, end: Option<&str>, precision: usize) -> String {
    match non_blank(end) {
        None => CURRENT_EMPLOYMENT_LABEL.to_string(),
        Some(end) => format!("{:.*}", precision, years_difference(start, Some(end))),
    }
}

pub fn format_duration_between(
    start: NaiveDate,
    end: Option<NaiveDate>,
    precision: usize,
) -> String {
    match end {
        None => CURRENT_EMPLOYMENT_LABEL.to_string(),
        Some(end) => format!("{:.*}", precision, years_between(start, end)),
    }
}

/// Resolves date text into a concrete span. `None` when either side fails to parse.
pub(crate) fn resolve_span(
    start: &str,
    end: Option<&str>,
    today: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let start = parse_calendar_date(start)?;
    let end = match non_blank(end) {
        Some(raw) => parse_calendar_date(raw)?,
        None => today,
    };
    Some((start, end))
}

/// `None` for missing or whitespace-only optional form text.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
