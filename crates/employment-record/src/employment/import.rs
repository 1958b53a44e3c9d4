use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::EmploymentForm;

#[derive(Debug, thiserror::Error)]
pub enum FormImportError {
    #[error("failed to read employment CSV: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid employment CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads employment forms from CSV whose headers are the camelCase form keys.
pub struct FormCsvReader;

impl FormCsvReader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<EmploymentForm>, FormImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<EmploymentForm>, FormImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut forms = Vec::new();

        for row in csv_reader.deserialize::<FormRow>() {
            forms.push(row?.into_form());
        }

        Ok(forms)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormRow {
    #[serde(default)]
    employer_name: String,
    #[serde(default)]
    annual_gross_income: String,
    #[serde(default)]
    employment_start_date: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    employment_end_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
}

impl FormRow {
    fn into_form(self) -> EmploymentForm {
        EmploymentForm {
            employer_name: self.employer_name,
            annual_gross_income: self.annual_gross_income,
            employment_start_date: self.employment_start_date,
            employment_end_date: self.employment_end_date,
            notes: self.notes,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
