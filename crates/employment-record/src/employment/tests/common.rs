use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde_json::Value;

use crate::employment::export::{DeliveryReceipt, ExportSink, SinkError};
use crate::employment::{employment_router, EmploymentForm, EmploymentFormService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date")
}

pub(super) fn submitted_at() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 3, 5, 12, 0, 0)
        .single()
        .expect("unambiguous local time")
}

pub(super) fn completed_form() -> EmploymentForm {
    EmploymentForm {
        employer_name: "  Acme Corp ".to_string(),
        annual_gross_income: "$90,000".to_string(),
        employment_start_date: "2022-01-01".to_string(),
        employment_end_date: Some("2022-12-31".to_string()),
        notes: Some("Full time".to_string()),
    }
}

pub(super) fn ongoing_form() -> EmploymentForm {
    EmploymentForm {
        employment_end_date: None,
        notes: None,
        ..completed_form()
    }
}

pub(super) fn invalid_form() -> EmploymentForm {
    EmploymentForm {
        employer_name: "A".to_string(),
        annual_gross_income: "abc".to_string(),
        employment_start_date: "2022-06-01".to_string(),
        employment_end_date: Some("2022-01-01".to_string()),
        notes: None,
    }
}

/// Sink that refuses every delivery and counts the attempts.
#[derive(Default)]
pub(super) struct FailingSink {
    attempts: AtomicUsize,
}

impl FailingSink {
    pub(super) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExportSink for FailingSink {
    async fn deliver(&self, _bytes: &[u8], _filename: &str) -> Result<DeliveryReceipt, SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(SinkError::Unavailable("disk full".to_string()))
    }
}

pub(super) fn router() -> axum::Router {
    employment_router(Arc::new(EmploymentFormService::default()))
}

pub(super) fn json_request(uri: &str, body: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("serializes"),
        ))
        .expect("request builds")
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
