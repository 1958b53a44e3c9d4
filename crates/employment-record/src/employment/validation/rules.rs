use chrono::NaiveDate;

use super::super::amount::parse_income;
use super::super::dates::{is_end_on_or_after_start, is_future_date, is_valid_date};
use super::codes::ErrorCode;

pub(crate) const EMPLOYER_NAME_MIN_CHARS: usize = 2;
pub(crate) const EMPLOYER_NAME_MAX_CHARS: usize = 100;
pub(crate) const ANNUAL_INCOME_CEILING: f64 = 10_000_000.0;
pub(crate) const NOTES_MAX_CHARS: usize = 1000;

/// Input handed to every rule of a field.
pub(crate) struct RuleInput<'a> {
    pub value: &'a str,
    pub today: NaiveDate,
}

pub(crate) type FieldRule = fn(&RuleInput<'_>) -> Result<(), ErrorCode>;

/// Rules run against the trimmed employer name.
pub(crate) const EMPLOYER_NAME_RULES: &[FieldRule] = &[
    employer_name_required,
    employer_name_min_length,
    employer_name_max_length,
    employer_name_characters_only,
];

pub(crate) const ANNUAL_INCOME_RULES: &[FieldRule] = &[
    annual_income_required,
    annual_income_numeric,
    annual_income_positive,
    annual_income_within_ceiling,
];

pub(crate) const START_DATE_RULES: &[FieldRule] =
    &[start_date_required, start_date_valid, start_date_not_future];

/// Only evaluated when an end date was entered.
pub(crate) const END_DATE_RULES: &[FieldRule] = &[end_date_valid];

pub(crate) const NOTES_RULES: &[FieldRule] = &[notes_within_limit];

/// First failing rule wins.
pub(crate) fn first_failure(rules: &[FieldRule], input: &RuleInput<'_>) -> Option<ErrorCode> {
    rules.iter().find_map(|rule| rule(input).err())
}

fn require(condition: bool, code: ErrorCode) -> Result<(), ErrorCode> {
    if condition {
        Ok(())
    } else {
        Err(code)
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn employer_name_required(input: &RuleInput<'_>) -> Result<(), ErrorCode> {
    require(!input.value.is_empty(), ErrorCode::EmployerNameRequired)
}

fn employer_name_min_length(input: &RuleInput<'_>) -> Result<(), ErrorCode> {
    require(
        char_len(input.value) >= EMPLOYER_NAME_MIN_CHARS,
        ErrorCode::EmployerNameMinLength,
    )
}

fn employer_name_max_length(input: &RuleInput<'_>) -> Result<(), ErrorCode> {
    require(
        char_len(input.value) <= EMPLOYER_NAME_MAX_CHARS,
        ErrorCode::EmployerNameMaxLength,
    )
}

fn employer_name_characters_only(input: &RuleInput<'_>) -> Result<(), ErrorCode> {
    require(
        input
            .value
            .chars()
            .all(|ch| ch.is_alphabetic() || ch == ' '),
        ErrorCode::EmployerNameCharactersOnly,
    )
}

fn annual_income_required(input: &RuleInput<'_>) -> Result<(), ErrorCode> {
    require(!input.value.trim().is_empty(), ErrorCode::AnnualIncomeRequired)
}

fn annual_income_numeric(input: &RuleInput<'_>) -> Result<(), ErrorCode> {
    require(
        parse_income(input.value).is_some_and(|amount| !amount.is_nan()),
        ErrorCode::AnnualIncomeInvalid,
    )
}

fn annual_income_positive(input: &RuleInput<'_>) -> Result<(), ErrorCode> {
    require(
        parse_income(input.value).is_some_and(|amount| amount > 0.0),
        ErrorCode::AnnualIncomePositive,
    )
}

fn annual_income_within_ceiling(input: &RuleInput<'_>) -> Result<(), ErrorCode> {
    require(
        parse_income(input.value).is_some_and(|amount| amount <= ANNUAL_INCOME_CEILING),
        ErrorCode::AnnualIncomeMax,
    )
}

fn start_date_required(input: &RuleInput<'_>) -> Result<(), ErrorCode> {
    require(!input.value.trim().is_empty(), ErrorCode::StartDateRequired)
}

fn start_date_valid(input: &RuleInput<'_>) -> Result<(), ErrorCode> {
    require(is_valid_date(input.value), ErrorCode::StartDateInvalid)
}

/// Runs after [`start_date_valid`]; unparseable text never counts as future.
fn start_date_not_future(input: &RuleInput<'_>) -> Result<(), ErrorCode> {
    require(
        !is_future_date(input.value, input.today),
        ErrorCode::StartDateFuture,
    )
}

fn end_date_valid(input: &RuleInput<'_>) -> Result<(), ErrorCode> {
    require(is_valid_date(input.value), ErrorCode::EndDateInvalid)
}

fn notes_within_limit(input: &RuleInput<'_>) -> Result<(), ErrorCode> {
    require(
        char_len(input.value) <= NOTES_MAX_CHARS,
        ErrorCode::NotesMaxLength,
    )
}

/// Cross-field rule: an end date may not precede the start date. Only meaningful
/// once both sides have passed their own field rules.
pub(crate) fn end_not_before_start(start: &str, end: &str) -> Result<(), ErrorCode> {
    require(
        is_end_on_or_after_start(start, end),
        ErrorCode::EndDateBeforeStart,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(value: &str) -> RuleInput<'_> {
        RuleInput {
            value,
            today: NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date"),
        }
    }

    #[test]
    fn employer_name_rules_run_in_order() {
        assert_eq!(
            first_failure(EMPLOYER_NAME_RULES, &input("")),
            Some(ErrorCode::EmployerNameRequired)
        );
        assert_eq!(
            first_failure(EMPLOYER_NAME_RULES, &input("A")),
            Some(ErrorCode::EmployerNameMinLength)
        );
        let long = "a".repeat(101);
        assert_eq!(
            first_failure(EMPLOYER_NAME_RULES, &input(&long)),
            Some(ErrorCode::EmployerNameMaxLength)
        );
        assert_eq!(
            first_failure(EMPLOYER_NAME_RULES, &input("Acme & Sons")),
            Some(ErrorCode::EmployerNameCharactersOnly)
        );
        assert_eq!(first_failure(EMPLOYER_NAME_RULES, &input("Acme Corp")), None);
        assert_eq!(first_failure(EMPLOYER_NAME_RULES, &input("Zürich Bank")), None);
    }

    #[test]
    fn income_rules_cover_format_sign_and_ceiling() {
        let cases = [
            ("", Some(ErrorCode::AnnualIncomeRequired)),
            ("twelve", Some(ErrorCode::AnnualIncomeInvalid)),
            ("$0", Some(ErrorCode::AnnualIncomePositive)),
            ("-10", Some(ErrorCode::AnnualIncomePositive)),
            ("10,000,000.01", Some(ErrorCode::AnnualIncomeMax)),
            ("$10,000,000", None),
            ("85,000.50", None),
        ];

        for (value, expected) in cases {
            assert_eq!(
                first_failure(ANNUAL_INCOME_RULES, &input(value)),
                expected,
                "income {value:?}"
            );
        }
    }

    #[test]
    fn start_date_must_be_valid_and_not_future() {
        assert_eq!(
            first_failure(START_DATE_RULES, &input("   ")),
            Some(ErrorCode::StartDateRequired)
        );
        assert_eq!(
            first_failure(START_DATE_RULES, &input("2025-13-01")),
            Some(ErrorCode::StartDateInvalid)
        );
        assert_eq!(
            first_failure(START_DATE_RULES, &input("2025-01-16")),
            Some(ErrorCode::StartDateFuture)
        );
        assert_eq!(first_failure(START_DATE_RULES, &input("2025-01-15")), None);
    }

    #[test]
    fn notes_limit_counts_characters() {
        let at_limit = "é".repeat(NOTES_MAX_CHARS);
        assert_eq!(first_failure(NOTES_RULES, &input(&at_limit)), None);
        let over = "n".repeat(NOTES_MAX_CHARS + 1);
        assert_eq!(
            first_failure(NOTES_RULES, &input(&over)),
            Some(ErrorCode::NotesMaxLength)
        );
    }

    #[test]
    fn end_date_may_equal_start() {
        assert_eq!(end_not_before_start("2024-04-01", "2024-04-01"), Ok(()));
        assert_eq!(
            end_not_before_start("2024-04-01", "2024-03-31"),
            Err(ErrorCode::EndDateBeforeStart)
        );
        assert_eq!(
            end_not_before_start("2024-04-01", "2024-04-01T23:59:00Z"),
            Ok(())
        );
    }

    #[test]
    fn date_rules_agree_with_calendar_predicates() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date");
        for raw in ["2025-01-15", "2025-01-16", "2024-02-29", "2023-02-29", "soon", ""] {
            let input = RuleInput { value: raw, today };
            assert_eq!(
                start_date_valid(&input).is_ok(),
                is_valid_date(raw),
                "validity of {raw:?}"
            );
            assert_eq!(
                end_date_valid(&input).is_ok(),
                is_valid_date(raw),
                "end validity of {raw:?}"
            );
            assert_eq!(
                start_date_not_future(&input).is_err(),
                is_future_date(raw, today),
                "future check of {raw:?}"
            );
        }
    }
}
