mod codes;
mod rules;

pub use codes::{ErrorCode, UnknownCode};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::parse_calendar_date;
use super::domain::{EmploymentForm, ValidatedRecord};
use super::messages::MessageResolver;
use rules::{first_failure, FieldRule, RuleInput};

/// Field paths of the employment form, serialized with their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    EmployerName,
    AnnualGrossIncome,
    EmploymentStartDate,
    EmploymentEndDate,
    Notes,
}

impl FormField {
    pub const fn path(self) -> &'static str {
        match self {
            FormField::EmployerName => "employerName",
            FormField::AnnualGrossIncome => "annualGrossIncome",
            FormField::EmploymentStartDate => "employmentStartDate",
            FormField::EmploymentEndDate => "employmentEndDate",
            FormField::Notes => "notes",
        }
    }
}

/// A single field failure. Carries only the code; text is resolved later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub code: ErrorCode,
}

/// Field failure paired with its display text for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFieldError {
    pub code: ErrorCode,
    pub message: String,
}

/// At most one failure per field, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<FormField, FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: FormField) -> Option<ErrorCode> {
        self.fields.get(&field).map(|error| error.code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, ErrorCode)> + '_ {
        self.fields.iter().map(|(field, error)| (*field, error.code))
    }

    /// Records a failure unless the field already has one.
    fn record(&mut self, field: FormField, code: ErrorCode) {
        self.fields.entry(field).or_insert(FieldError { code });
    }

    /// Field path -> `{ code, message }` using the supplied message table.
    pub fn resolve(
        &self,
        messages: &dyn MessageResolver,
    ) -> BTreeMap<&'static str, ResolvedFieldError> {
        self.fields
            .iter()
            .map(|(field, error)| {
                (
                    field.path(),
                    ResolvedFieldError {
                        code: error.code,
                        message: messages.validation_message(error.code).into_owned(),
                    },
                )
            })
            .collect()
    }
}

/// Validates every field independently, then the end-after-start rule.
///
/// Never fails other than by returning the collected field errors.
pub fn validate_form(
    form: &EmploymentForm,
    today: NaiveDate,
) -> Result<ValidatedRecord, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let employer_name = form.employer_name.trim();

    check(
        &mut errors,
        FormField::EmployerName,
        rules::EMPLOYER_NAME_RULES,
        employer_name,
        today,
    );
    check(
        &mut errors,
        FormField::AnnualGrossIncome,
        rules::ANNUAL_INCOME_RULES,
        &form.annual_gross_income,
        today,
    );
    check(
        &mut errors,
        FormField::EmploymentStartDate,
        rules::START_DATE_RULES,
        &form.employment_start_date,
        today,
    );
    if let Some(end) = form.end_date() {
        check(
            &mut errors,
            FormField::EmploymentEndDate,
            rules::END_DATE_RULES,
            end,
            today,
        );
    }
    if let Some(notes) = form.notes.as_deref() {
        check(&mut errors, FormField::Notes, rules::NOTES_RULES, notes, today);
    }

    let start = parse_calendar_date(&form.employment_start_date);
    let end_text = form.end_date();
    let end = end_text.and_then(parse_calendar_date);
    if let (Some(_), Some(_), Some(end_text)) = (start, end, end_text) {
        if let Err(code) = rules::end_not_before_start(&form.employment_start_date, end_text) {
            errors.record(FormField::EmploymentEndDate, code);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let Some(employment_start_date) = start else {
        errors.record(FormField::EmploymentStartDate, ErrorCode::StartDateInvalid);
        return Err(errors);
    };

    Ok(ValidatedRecord {
        employer_name: employer_name.to_string(),
        annual_gross_income: form.annual_gross_income.trim().to_string(),
        employment_start_date,
        employment_end_date: end,
        notes: form.notes().unwrap_or_default().to_string(),
    })
}

fn check(
    errors: &mut ValidationErrors,
    field: FormField,
    rules: &[FieldRule],
    value: &str,
    today: NaiveDate,
) {
    if let Some(code) = first_failure(rules, &RuleInput { value, today }) {
        errors.record(field, code);
    }
}
