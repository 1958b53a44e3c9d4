use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Local;
use serde_json::json;
use tracing::error;

use super::domain::EmploymentForm;
use super::export::{DeliveredDocument, MemorySink};
use super::service::{EmploymentFormService, SubmissionError};

/// Router builder exposing validation, live preview, and export download endpoints.
pub fn employment_router(service: Arc<EmploymentFormService>) -> Router {
    Router::new()
        .route("/api/v1/employment/validate", post(validate_handler))
        .route("/api/v1/employment/preview", post(preview_handler))
        .route("/api/v1/employment/export", post(export_handler))
        .with_state(service)
}

pub(crate) async fn validate_handler(
    State(service): State<Arc<EmploymentFormService>>,
    Json(form): Json<EmploymentForm>,
) -> Response {
    match service.validate(&form, Local::now().date_naive()) {
        Ok(_) => (StatusCode::OK, Json(json!({ "valid": true }))).into_response(),
        Err(errors) => {
            let payload = json!({
                "valid": false,
                "errors": errors.resolve(service.messages()),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn preview_handler(
    State(service): State<Arc<EmploymentFormService>>,
    Json(form): Json<EmploymentForm>,
) -> Response {
    let preview = service.preview(&form, Local::now().date_naive());
    (StatusCode::OK, Json(preview)).into_response()
}

/// The response body is the download: the export is delivered into a per-request buffer
/// and streamed back as an attachment.
pub(crate) async fn export_handler(
    State(service): State<Arc<EmploymentFormService>>,
    Json(form): Json<EmploymentForm>,
) -> Response {
    let sink = MemorySink::default();
    let outcome = service.submit(&sink, &form).await;

    let outcome = match outcome {
        Ok(receipt) => match sink.take(&receipt.filename) {
            Some(document) => return attachment_response(document),
            None => Err(SubmissionError::Unexpected(format!(
                "export buffer lost document '{}'",
                receipt.filename
            ))),
        },
        Err(err) => Err(err),
    };

    let notification = service.notification_for(&outcome);
    match outcome {
        Err(SubmissionError::Validation(errors)) => {
            let payload = json!({
                "notification": notification,
                "errors": errors.resolve(service.messages()),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(err) => {
            error!(error = %err, "employment export request failed");
            let payload = json!({ "notification": notification });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
    }
}

fn attachment_response(document: DeliveredDocument) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response()
}
