use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::non_blank;

/// Raw employment form values exactly as entered, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentForm {
    #[serde(default)]
    pub employer_name: String,
    #[serde(default)]
    pub annual_gross_income: String,
    #[serde(default)]
    pub employment_start_date: String,
    #[serde(default)]
    pub employment_end_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl EmploymentForm {
    /// End date text when one was entered; blank input counts as ongoing employment.
    pub fn end_date(&self) -> Option<&str> {
        non_blank(self.employment_end_date.as_deref())
    }

    pub fn notes(&self) -> Option<&str> {
        non_blank(self.notes.as_deref())
    }
}

/// Normalized record produced by a successful validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedRecord {
    pub employer_name: String,
    pub annual_gross_income: String,
    pub employment_start_date: NaiveDate,
    pub employment_end_date: Option<NaiveDate>,
    pub notes: String,
}

impl ValidatedRecord {
    pub fn is_ongoing(&self) -> bool {
        self.employment_end_date.is_none()
    }
}

/// Figures computed at submit time and never stored on the record itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFigures {
    pub total_income: f64,
    pub employment_duration: String,
}

/// Live totals shown while the form is being edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomePreview {
    pub total_income: f64,
    pub formatted_total: String,
    pub employment_years: f64,
    pub employment_duration: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employment::dates::format_duration;

    #[test]
    fn blank_optionals_read_as_absent_everywhere() {
        let form = EmploymentForm {
            employment_start_date: "2020-01-01".to_string(),
            employment_end_date: Some(" \t ".to_string()),
            notes: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(form.end_date(), None);
        assert_eq!(form.notes(), None);
        assert_eq!(
            format_duration(
                &form.employment_start_date,
                form.employment_end_date.as_deref(),
                2
            ),
            "Current"
        );
    }
}
