use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use super::amount::parse_income;
use super::dates::{format_duration, format_duration_between, DEFAULT_DURATION_PRECISION};
use super::domain::{DerivedFigures, EmploymentForm, IncomePreview, ValidatedRecord};
use super::export::{self, DeliveryReceipt, ExportError, ExportPayload, ExportSink};
use super::income::{
    employment_years_as_of, format_whole_currency, project_total_income, total_income_as_of,
};
use super::messages::{
    DefaultMessages, FeedbackCode, MessageResolver, Notification, NotificationSeverity,
};
use super::validation::{validate_form, ValidationErrors};

/// Service composing validation, income projection, and export delivery.
pub struct EmploymentFormService {
    messages: Arc<dyn MessageResolver>,
    duration_precision: usize,
}

impl Default for EmploymentFormService {
    fn default() -> Self {
        Self::new(Arc::new(DefaultMessages))
    }
}

impl EmploymentFormService {
    pub fn new(messages: Arc<dyn MessageResolver>) -> Self {
        Self {
            messages,
            duration_precision: DEFAULT_DURATION_PRECISION,
        }
    }

    pub fn with_duration_precision(mut self, precision: usize) -> Self {
        self.duration_precision = precision;
        self
    }

    pub fn messages(&self) -> &dyn MessageResolver {
        self.messages.as_ref()
    }

    pub fn validate(
        &self,
        form: &EmploymentForm,
        today: NaiveDate,
    ) -> Result<ValidatedRecord, ValidationErrors> {
        validate_form(form, today)
    }

    /// Running totals for a form that may still be incomplete or invalid.
    pub fn preview(&self, form: &EmploymentForm, today: NaiveDate) -> IncomePreview {
        let end = form.end_date();
        let total_income = total_income_as_of(
            &form.annual_gross_income,
            &form.employment_start_date,
            end,
            today,
        );

        IncomePreview {
            total_income,
            formatted_total: format!("${}", format_whole_currency(total_income)),
            employment_years: employment_years_as_of(&form.employment_start_date, end, today),
            employment_duration: format_duration(
                &form.employment_start_date,
                end,
                self.duration_precision,
            ),
        }
    }

    /// Figures derived for a validated record at submit time.
    pub fn derive(&self, record: &ValidatedRecord, today: NaiveDate) -> DerivedFigures {
        let annual_income = parse_income(&record.annual_gross_income).unwrap_or_default();

        DerivedFigures {
            total_income: project_total_income(
                annual_income,
                record.employment_start_date,
                record.employment_end_date,
                today,
            ),
            employment_duration: format_duration_between(
                record.employment_start_date,
                record.employment_end_date,
                self.duration_precision,
            ),
        }
    }

    /// Validates the form and assembles the payload and filename without delivering anything.
    pub fn prepare_export(
        &self,
        form: &EmploymentForm,
        now: DateTime<Local>,
    ) -> Result<PreparedExport, SubmissionError> {
        let record = self
            .validate(form, now.date_naive())
            .map_err(SubmissionError::Validation)?;
        let derived = self.derive(&record, now.date_naive());
        let exported_at = now.with_timezone(&Utc);

        let filename =
            export::export_filename(&record.employer_name, Some(exported_at.date_naive()));
        let payload = ExportPayload::build(form, &record, &derived, exported_at);

        Ok(PreparedExport { filename, payload })
    }

    pub async fn submit<S>(
        &self,
        sink: &S,
        form: &EmploymentForm,
    ) -> Result<SubmissionReceipt, SubmissionError>
    where
        S: ExportSink + ?Sized,
    {
        self.submit_at(sink, form, Local::now()).await
    }

    /// Full submission: validate, derive, build the payload, and hand it to the sink.
    pub async fn submit_at<S>(
        &self,
        sink: &S,
        form: &EmploymentForm,
        now: DateTime<Local>,
    ) -> Result<SubmissionReceipt, SubmissionError>
    where
        S: ExportSink + ?Sized,
    {
        let prepared = match self.prepare_export(form, now) {
            Ok(prepared) => prepared,
            Err(err) => {
                warn!(error = %err, "employment form rejected");
                return Err(err);
            }
        };

        let delivery = export::emit(&prepared.payload, &prepared.filename, sink)
            .await
            .map_err(|err| {
                error!(error = %err, filename = %prepared.filename, "employment export failed");
                SubmissionError::Export(err)
            })?;

        info!(
            filename = %delivery.filename,
            bytes = delivery.bytes_written,
            total_income = prepared.payload.total_income,
            "employment record exported"
        );

        Ok(SubmissionReceipt {
            filename: prepared.filename,
            payload: prepared.payload,
            delivery,
        })
    }

    /// Converts a submission outcome into the single notification shown to the user.
    pub fn notification_for(
        &self,
        outcome: &Result<SubmissionReceipt, SubmissionError>,
    ) -> Notification {
        match outcome {
            Ok(_) => Notification::new(
                NotificationSeverity::Success,
                self.messages.feedback_message(FeedbackCode::FormSaved),
            ),
            Err(SubmissionError::Validation(_)) => Notification::new(
                NotificationSeverity::Warning,
                self.messages.feedback_message(FeedbackCode::FormValidationError),
            ),
            Err(SubmissionError::Export(err)) => {
                error!(error = %err, "employment export notification");
                Notification::new(
                    NotificationSeverity::Error,
                    self.messages.feedback_message(err.feedback_code()),
                )
            }
            Err(SubmissionError::Unexpected(detail)) => {
                error!(detail = %detail, "unexpected submission failure");
                Notification::new(
                    NotificationSeverity::Error,
                    self.messages.feedback_message(FeedbackCode::UnexpectedError),
                )
            }
        }
    }
}

/// Payload and filename ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedExport {
    pub filename: String,
    pub payload: ExportPayload,
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub filename: String,
    pub payload: ExportPayload,
    pub delivery: DeliveryReceipt,
}

/// Error raised by a submission attempt. The form state is never reset on failure.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("form has {} invalid field(s)", .0.len())]
    Validation(ValidationErrors),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl SubmissionError {
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            SubmissionError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
