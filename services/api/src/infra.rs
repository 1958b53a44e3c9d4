use chrono::NaiveDate;
use employment_record::config::ExportConfig;
use employment_record::employment::EmploymentFormService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_service(config: &ExportConfig) -> EmploymentFormService {
    EmploymentFormService::default().with_duration_precision(config.duration_precision)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn service_uses_configured_precision() {
        let service = build_service(&ExportConfig {
            directory: PathBuf::from("exports"),
            duration_precision: 1,
        });
        let form = employment_record::employment::EmploymentForm {
            employer_name: "Acme".to_string(),
            annual_gross_income: "1000".to_string(),
            employment_start_date: "2020-01-01".to_string(),
            employment_end_date: Some("2021-07-02".to_string()),
            notes: None,
        };

        let today = parse_date("2024-01-01").expect("valid date");
        assert_eq!(service.preview(&form, today).employment_duration, "1.5");
    }

    #[test]
    fn parse_date_reports_offending_input() {
        let err = parse_date("01/02/2024").expect_err("wrong format");
        assert!(err.contains("01/02/2024"));
    }
}
