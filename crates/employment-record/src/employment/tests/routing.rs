use super::common::*;
use axum::extract::State;
use axum::http::{header, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::employment::{EmploymentFormService, ExportPayload};

#[tokio::test]
async fn validate_route_accepts_a_complete_form() {
    let response = router()
        .oneshot(json_request(
            "/api/v1/employment/validate",
            &serde_json::to_value(completed_form()).expect("serializes"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!({ "valid": true }));
}

#[tokio::test]
async fn validate_route_returns_resolved_field_errors() {
    let response = router()
        .oneshot(json_request(
            "/api/v1/employment/validate",
            &json!({ "employerName": "", "annualGrossIncome": "0" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["valid"], json!(false));
    assert_eq!(
        payload["errors"]["employerName"],
        json!({ "code": "EMPLOYER_NAME_REQUIRED", "message": "Employer name is required" })
    );
    assert_eq!(
        payload["errors"]["annualGrossIncome"]["code"],
        "ANNUAL_INCOME_POSITIVE"
    );
    assert_eq!(
        payload["errors"]["employmentStartDate"]["code"],
        "START_DATE_REQUIRED"
    );
    assert!(payload["errors"].get("employmentEndDate").is_none());
}

#[tokio::test]
async fn preview_handler_reports_running_totals() {
    let service = Arc::new(EmploymentFormService::default());

    let response = crate::employment::router::preview_handler(
        State(service),
        axum::Json(completed_form()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["totalIncome"], json!(90_000.0));
    assert_eq!(payload["formattedTotal"], "$90,000");
    assert_eq!(payload["employmentDuration"], "1.00");
}

#[tokio::test]
async fn export_route_streams_the_document_as_an_attachment() {
    let response = router()
        .oneshot(json_request(
            "/api/v1/employment/export",
            &serde_json::to_value(completed_form()).expect("serializes"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .expect("content disposition");
    assert!(disposition.starts_with("attachment; filename=\"employment-data-acme-corp-"));
    assert!(disposition.ends_with(".json\""));

    let body = read_body(response).await;
    let payload: ExportPayload = serde_json::from_slice(&body).expect("export payload");
    assert_eq!(payload.employer_name, "Acme Corp");
    assert_eq!(payload.total_income, 90_000.0);
    assert!(String::from_utf8(body)
        .expect("utf8")
        .starts_with("{\n  \"employerName\""));
}

#[tokio::test]
async fn export_route_rejects_invalid_forms_with_notification() {
    let response = router()
        .oneshot(json_request(
            "/api/v1/employment/export",
            &serde_json::to_value(invalid_form()).expect("serializes"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["notification"]["severity"], "warning");
    assert_eq!(
        payload["errors"]["employmentEndDate"]["message"],
        "End date must be after start date"
    );
}
