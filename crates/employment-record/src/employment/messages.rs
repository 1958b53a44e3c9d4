//! Code-to-text resolution and user-facing notifications.
//!
//! Validation and the submission pipeline only ever emit codes. A
//! [`MessageResolver`] turns them into display text so the wording can change
//! (or be localized) without touching any rule.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::ErrorCode;

/// Non-field outcomes reported to the user after a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackCode {
    FileGenerationError,
    FileDownloadError,
    FormValidationError,
    UnexpectedError,
    FormSaved,
    FileDownloaded,
}

impl FeedbackCode {
    pub const ALL: [FeedbackCode; 6] = [
        FeedbackCode::FileGenerationError,
        FeedbackCode::FileDownloadError,
        FeedbackCode::FormValidationError,
        FeedbackCode::UnexpectedError,
        FeedbackCode::FormSaved,
        FeedbackCode::FileDownloaded,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FeedbackCode::FileGenerationError => "FILE_GENERATION_ERROR",
            FeedbackCode::FileDownloadError => "FILE_DOWNLOAD_ERROR",
            FeedbackCode::FormValidationError => "FORM_VALIDATION_ERROR",
            FeedbackCode::UnexpectedError => "UNEXPECTED_ERROR",
            FeedbackCode::FormSaved => "FORM_SAVED",
            FeedbackCode::FileDownloaded => "FILE_DOWNLOADED",
        }
    }
}

/// Swappable lookup from codes to display text.
pub trait MessageResolver: Send + Sync {
    fn validation_message(&self, code: ErrorCode) -> Cow<'static, str>;
    fn feedback_message(&self, code: FeedbackCode) -> Cow<'static, str>;
}

/// Built-in English message table.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl MessageResolver for DefaultMessages {
    fn validation_message(&self, code: ErrorCode) -> Cow<'static, str> {
        let text = match code {
            ErrorCode::EmployerNameRequired => "Employer name is required",
            ErrorCode::EmployerNameMinLength => "Employer name must be at least 2 characters",
            ErrorCode::EmployerNameMaxLength => "Employer name must be less than 100 characters",
            ErrorCode::EmployerNameCharactersOnly => {
                "Employer name can only contain letters and spaces"
            }
            ErrorCode::AnnualIncomeRequired => "Annual gross income is required",
            ErrorCode::AnnualIncomeInvalid => "Must be a valid number",
            ErrorCode::AnnualIncomePositive => "Income must be greater than 0",
            ErrorCode::AnnualIncomeMax => "Income must be realistic",
            ErrorCode::StartDateRequired => "Employment start date is required",
            ErrorCode::StartDateInvalid => "Please enter a valid date",
            ErrorCode::StartDateFuture => "Start date cannot be in the future",
            ErrorCode::EndDateInvalid => "Please enter a valid end date",
            ErrorCode::EndDateBeforeStart => "End date must be after start date",
            ErrorCode::NotesMaxLength => "Notes must be less than 1000 characters",
        };
        Cow::Borrowed(text)
    }

    fn feedback_message(&self, code: FeedbackCode) -> Cow<'static, str> {
        let text = match code {
            FeedbackCode::FileGenerationError => "Failed to generate file. Please try again.",
            FeedbackCode::FileDownloadError => {
                "Failed to download file. Please check your browser settings."
            }
            FeedbackCode::FormValidationError => {
                "Please fix the validation errors before submitting"
            }
            FeedbackCode::UnexpectedError => "An unexpected error occurred. Please try again.",
            FeedbackCode::FormSaved => "Form saved successfully! File has been downloaded.",
            FeedbackCode::FileDownloaded => "Employment data file downloaded successfully.",
        };
        Cow::Borrowed(text)
    }
}

/// Resolves a raw code string from either vocabulary; unknown keys are echoed back.
pub fn resolve_message_key(key: &str, messages: &dyn MessageResolver) -> String {
    if let Ok(code) = key.parse::<ErrorCode>() {
        return messages.validation_message(code).into_owned();
    }

    FeedbackCode::ALL
        .into_iter()
        .find(|code| code.as_str() == key)
        .map(|code| messages.feedback_message(code).into_owned())
        .unwrap_or_else(|| key.to_string())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSeverity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

/// Transient message shown once after a submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: NotificationSeverity,
    pub message: String,
}

impl Notification {
    pub fn new(severity: NotificationSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == NotificationSeverity::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            NotificationSeverity::Success => "success",
            NotificationSeverity::Error => "error",
            NotificationSeverity::Warning => "warning",
            NotificationSeverity::Info => "info",
        };
        write!(f, "[{label}] {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ShoutingMessages;

    impl MessageResolver for ShoutingMessages {
        fn validation_message(&self, code: ErrorCode) -> Cow<'static, str> {
            Cow::Owned(format!("INVALID: {code}"))
        }

        fn feedback_message(&self, code: FeedbackCode) -> Cow<'static, str> {
            Cow::Owned(code.as_str().to_string())
        }
    }

    #[test]
    fn every_validation_code_has_default_text() {
        for code in ErrorCode::ALL {
            let message = DefaultMessages.validation_message(code);
            assert!(!message.is_empty());
            assert_ne!(message, code.as_str());
        }
    }

    #[test]
    fn resolves_keys_from_both_vocabularies() {
        assert_eq!(
            resolve_message_key("NOTES_MAX_LENGTH", &DefaultMessages),
            "Notes must be less than 1000 characters"
        );
        assert_eq!(
            resolve_message_key("FORM_SAVED", &DefaultMessages),
            "Form saved successfully! File has been downloaded."
        );
    }

    #[test]
    fn unknown_keys_fall_back_to_the_key() {
        assert_eq!(
            resolve_message_key("SOMETHING_ELSE", &DefaultMessages),
            "SOMETHING_ELSE"
        );
    }

    #[test]
    fn resolver_can_be_swapped_without_touching_codes() {
        assert_eq!(
            resolve_message_key("START_DATE_FUTURE", &ShoutingMessages),
            "INVALID: START_DATE_FUTURE"
        );
    }

    #[test]
    fn notification_renders_severity_label() {
        let notification = Notification::new(NotificationSeverity::Error, "boom");
        assert!(notification.is_error());
        assert_eq!(notification.to_string(), "[error] boom");
    }
}
