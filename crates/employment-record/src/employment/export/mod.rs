mod sink;

pub use sink::{
    DeliveredDocument, DeliveryReceipt, DirectorySink, ExportSink, MemorySink, SinkError,
};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use super::domain::{DerivedFigures, EmploymentForm, ValidatedRecord};
use super::messages::FeedbackCode;

const FILENAME_PREFIX: &str = "employment-data";
const FILENAME_EXTENSION: &str = "json";

/// Exported document: the validated record plus figures derived at submit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub employer_name: String,
    pub annual_gross_income: String,
    pub employment_start_date: String,
    pub employment_end_date: Option<String>,
    pub notes: String,
    #[serde(serialize_with = "finite_amount")]
    pub total_income: f64,
    pub employment_duration: String,
    pub export_date: String,
}

impl ExportPayload {
    /// Dates are exported as entered (trimmed), not re-rendered from the parsed values.
    pub fn build(
        form: &EmploymentForm,
        record: &ValidatedRecord,
        derived: &DerivedFigures,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            employer_name: record.employer_name.clone(),
            annual_gross_income: record.annual_gross_income.clone(),
            employment_start_date: form.employment_start_date.trim().to_string(),
            employment_end_date: form.end_date().map(|end| end.trim().to_string()),
            notes: record.notes.clone(),
            total_income: derived.total_income,
            employment_duration: derived.employment_duration.clone(),
            export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn finite_amount<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        Err(serde::ser::Error::custom(format!(
            "total income {value} is not a finite number"
        )))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("File download failed: Failed to serialize data: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("File download failed: {0}")]
    Delivery(#[from] SinkError),
}

impl ExportError {
    /// Feedback shown to the user; the error text itself is only logged.
    pub fn feedback_code(&self) -> FeedbackCode {
        match self {
            ExportError::Serialization(_) => FeedbackCode::FileGenerationError,
            ExportError::Delivery(_) => FeedbackCode::FileDownloadError,
        }
    }
}

/// `employment-data-{slug}-{YYYY-MM-DD}.json`; the date defaults to today (UTC).
pub fn export_filename(employer_name: &str, date: Option<NaiveDate>) -> String {
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    format!(
        "{FILENAME_PREFIX}-{}-{}.{FILENAME_EXTENSION}",
        slugify(employer_name),
        date.format("%Y-%m-%d")
    )
}

/// Lowercase, whitespace runs to a single `-`, everything outside `[a-z0-9-]` dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }

        in_whitespace = false;
        slug.extend(
            ch.to_lowercase()
                .filter(|lower| matches!(lower, 'a'..='z' | '0'..='9' | '-')),
        );
    }

    slug
}

/// UTF-8 JSON with two-space indentation.
pub fn render(payload: &ExportPayload) -> Result<Vec<u8>, ExportError> {
    Ok(serde_json::to_vec_pretty(payload)?)
}

/// Renders the payload and hands it to the sink in one step.
pub async fn emit<S>(
    payload: &ExportPayload,
    filename: &str,
    sink: &S,
) -> Result<DeliveryReceipt, ExportError>
where
    S: ExportSink + ?Sized,
{
    let bytes = render(payload)?;
    debug!(filename, bytes = bytes.len(), "export document rendered");
    Ok(sink.deliver(&bytes, filename).await?)
}
