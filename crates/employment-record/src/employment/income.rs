//! Income accrual over an employment span.
//!
//! Accrual counts the start day as a worked day, so the day count used here is
//! one larger than the display duration in [`super::dates`].

use chrono::NaiveDate;

use super::amount::{group_thousands, parse_income};
use super::dates::{count_leap_days, resolve_span, today, DAYS_PER_YEAR};

/// Accrual years between two dates, counting both the start and end day.
pub fn accrual_years_between(start: NaiveDate, end: NaiveDate) -> f64 {
    if start > end {
        return 0.0;
    }

    let accrued_days = (end - start).num_days() + 1;
    let adjusted_days = accrued_days - i64::from(count_leap_days(start, end));
    (adjusted_days as f64 / DAYS_PER_YEAR).max(0.0)
}

pub fn employment_years(start: &str, end: Option<&str>) -> f64 {
    employment_years_as_of(start, end, today())
}

pub fn employment_years_as_of(start: &str, end: Option<&str>, today: NaiveDate) -> f64 {
    match resolve_span(start, end, today) {
        Some((start, end)) => accrual_years_between(start, end),
        None => 0.0,
    }
}

/// Total income earned over the span; a missing end date accrues up to today.
pub fn total_income(annual_income: &str, start: &str, end: Option<&str>) -> f64 {
    total_income_as_of(annual_income, start, end, today())
}

pub fn total_income_as_of(
    annual_income: &str,
    start: &str,
    end: Option<&str>,
    today: NaiveDate,
) -> f64 {
    if annual_income.trim().is_empty() || start.trim().is_empty() {
        return 0.0;
    }

    let Some(annual) = parse_income(annual_income) else {
        return 0.0;
    };

    non_negative(annual * employment_years_as_of(start, end, today))
}

/// Projection over an already validated span.
pub fn project_total_income(
    annual_income: f64,
    start: NaiveDate,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> f64 {
    let end = end.unwrap_or(today);
    non_negative(annual_income * accrual_years_between(start, end))
}

fn non_negative(total: f64) -> f64 {
    if total.is_finite() && total > 0.0 {
        total
    } else {
        0.0
    }
}

const MAX_FRACTION_DIGITS: usize = 100;
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// en-US grouped rendering with half-away-from-zero rounding at
/// `max_fraction_digits` and zero padding up to `min_fraction_digits`.
pub fn format_currency(
    amount: f64,
    min_fraction_digits: usize,
    max_fraction_digits: usize,
) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    if amount.is_infinite() {
        let symbol = if amount > 0.0 { "∞" } else { "-∞" };
        return symbol.to_string();
    }

    let max_digits = max_fraction_digits
        .max(min_fraction_digits)
        .min(MAX_FRACTION_DIGITS);
    let min_digits = min_fraction_digits.min(max_digits);
    let scaled = amount.abs() * 10f64.powi(max_digits as i32);
    // Past 2^53 the scaled value has no fractional part left to round.
    let rendered = if scaled < EXACT_INTEGER_LIMIT {
        format!(
            "{:.*}",
            max_digits,
            scaled.round() / 10f64.powi(max_digits as i32)
        )
    } else {
        format!("{:.*}", max_digits, amount.abs())
    };
    let (integer, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));

    let mut fraction = fraction.trim_end_matches('0').to_string();
    while fraction.len() < min_digits {
        fraction.push('0');
    }

    let is_zero = rendered.bytes().all(|byte| matches!(byte, b'0' | b'.'));
    let mut formatted = String::with_capacity(rendered.len() + rendered.len() / 3 + 2);
    if amount < 0.0 && !is_zero {
        formatted.push('-');
    }
    formatted.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        formatted.push('.');
        formatted.push_str(&fraction);
    }
    formatted
}

/// Whole-unit rendering used for the running total (`1234567.8` -> `"1,234,568"`).
pub fn format_whole_currency(amount: f64) -> String {
    format_currency(amount, 0, 0)
}
