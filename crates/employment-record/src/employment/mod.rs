//! Single employment record capture: amount and date helpers, income projection,
//! field validation, and JSON export through a pluggable delivery sink.
//!
//! Validation only produces codes; display text comes from a [`MessageResolver`]
//! so the HTTP and CLI surfaces can share one message table.

pub mod amount;
pub mod dates;
pub mod domain;
pub mod export;
pub mod import;
pub mod income;
pub mod messages;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{DerivedFigures, EmploymentForm, IncomePreview, ValidatedRecord};
pub use export::{
    export_filename, DeliveredDocument, DeliveryReceipt, DirectorySink, ExportError,
    ExportPayload, ExportSink, MemorySink, SinkError,
};
pub use import::{FormCsvReader, FormImportError};
pub use messages::{
    resolve_message_key, DefaultMessages, FeedbackCode, MessageResolver, Notification,
    NotificationSeverity,
};
pub use router::employment_router;
pub use service::{EmploymentFormService, PreparedExport, SubmissionError, SubmissionReceipt};
pub use validation::{
    validate_form, ErrorCode, FieldError, FormField, ResolvedFieldError, ValidationErrors,
};
