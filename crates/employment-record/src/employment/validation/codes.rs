use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed vocabulary of field-level validation failures.
///
/// Codes are stable identifiers; display text lives behind
/// [`crate::employment::messages::MessageResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    EmployerNameRequired,
    EmployerNameMinLength,
    EmployerNameMaxLength,
    EmployerNameCharactersOnly,
    AnnualIncomeRequired,
    AnnualIncomeInvalid,
    AnnualIncomePositive,
    AnnualIncomeMax,
    StartDateRequired,
    StartDateInvalid,
    StartDateFuture,
    EndDateInvalid,
    EndDateBeforeStart,
    NotesMaxLength,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 14] = [
        ErrorCode::EmployerNameRequired,
        ErrorCode::EmployerNameMinLength,
        ErrorCode::EmployerNameMaxLength,
        ErrorCode::EmployerNameCharactersOnly,
        ErrorCode::AnnualIncomeRequired,
        ErrorCode::AnnualIncomeInvalid,
        ErrorCode::AnnualIncomePositive,
        ErrorCode::AnnualIncomeMax,
        ErrorCode::StartDateRequired,
        ErrorCode::StartDateInvalid,
        ErrorCode::StartDateFuture,
        ErrorCode::EndDateInvalid,
        ErrorCode::EndDateBeforeStart,
        ErrorCode::NotesMaxLength,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmployerNameRequired => "EMPLOYER_NAME_REQUIRED",
            ErrorCode::EmployerNameMinLength => "EMPLOYER_NAME_MIN_LENGTH",
            ErrorCode::EmployerNameMaxLength => "EMPLOYER_NAME_MAX_LENGTH",
            ErrorCode::EmployerNameCharactersOnly => "EMPLOYER_NAME_CHARACTERS_ONLY",
            ErrorCode::AnnualIncomeRequired => "ANNUAL_INCOME_REQUIRED",
            ErrorCode::AnnualIncomeInvalid => "ANNUAL_INCOME_INVALID",
            ErrorCode::AnnualIncomePositive => "ANNUAL_INCOME_POSITIVE",
            ErrorCode::AnnualIncomeMax => "ANNUAL_INCOME_MAX",
            ErrorCode::StartDateRequired => "START_DATE_REQUIRED",
            ErrorCode::StartDateInvalid => "START_DATE_INVALID",
            ErrorCode::StartDateFuture => "START_DATE_FUTURE",
            ErrorCode::EndDateInvalid => "END_DATE_INVALID",
            ErrorCode::EndDateBeforeStart => "END_DATE_BEFORE_START",
            ErrorCode::NotesMaxLength => "NOTES_MAX_LENGTH",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a code string is outside the validation vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown validation code '{0}'")]
pub struct UnknownCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownCode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .into_iter()
            .find(|code| code.as_str() == value)
            .ok_or_else(|| UnknownCode(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_name_matches_wire_symbol() {
        for code in ErrorCode::ALL {
            let json = serde_json::to_string(&code).expect("serializes");
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn parses_known_symbols_only() {
        assert_eq!(
            "END_DATE_BEFORE_START".parse::<ErrorCode>(),
            Ok(ErrorCode::EndDateBeforeStart)
        );
        assert!("end_date_before_start".parse::<ErrorCode>().is_err());
    }
}
