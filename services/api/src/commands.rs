use crate::infra::{build_service, parse_date};
use chrono::{Local, NaiveDate};
use clap::Args;
use employment_record::config::AppConfig;
use employment_record::employment::income::format_whole_currency;
use employment_record::employment::{
    DirectorySink, EmploymentForm, EmploymentFormService, FormCsvReader, IncomePreview,
    SubmissionError, ValidationErrors,
};
use employment_record::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct FormArgs {
    /// Employer name as entered on the form
    #[arg(long)]
    pub(crate) employer_name: String,
    /// Annual gross income, e.g. "$85,000"
    #[arg(long)]
    pub(crate) annual_income: String,
    /// Employment start date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) start_date: String,
    /// Employment end date (YYYY-MM-DD); omit for current employment
    #[arg(long)]
    pub(crate) end_date: Option<String>,
    /// Free-form notes
    #[arg(long)]
    pub(crate) notes: Option<String>,
}

impl FormArgs {
    pub(crate) fn into_form(self) -> EmploymentForm {
        EmploymentForm {
            employer_name: self.employer_name,
            annual_gross_income: self.annual_income,
            employment_start_date: self.start_date,
            employment_end_date: self.end_date,
            notes: self.notes,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    #[command(flatten)]
    pub(crate) form: FormArgs,
    /// Evaluation date for future-date checks and accrual (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    pub(crate) form: FormArgs,
    /// Directory receiving the export (defaults to APP_EXPORT_DIR)
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file whose headers are the form keys (employerName, annualGrossIncome, ...)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Evaluation date for future-date checks and accrual (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config.export);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let form = args.form.into_form();

    match service.validate(&form, today) {
        Ok(record) => {
            println!("Employment record for {} is valid", record.employer_name);
            render_preview(&service.preview(&form, today));
            Ok(())
        }
        Err(errors) => {
            println!("Employment record is invalid");
            render_errors(&service, &errors, "  ");
            Err(SubmissionError::Validation(errors).into())
        }
    }
}

pub(crate) async fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config.export);
    let directory = args.out_dir.unwrap_or(config.export.directory);
    let sink = DirectorySink::new(directory);
    let form = args.form.into_form();

    let outcome = service.submit(&sink, &form).await;
    println!("{}", service.notification_for(&outcome));

    match outcome {
        Ok(receipt) => {
            let location = receipt
                .delivery
                .location
                .unwrap_or_else(|| receipt.filename.clone());
            println!("- Written to {location} ({} bytes)", receipt.delivery.bytes_written);
            println!(
                "- Total income ${} over {}",
                format_whole_currency(receipt.payload.total_income),
                duration_label(&receipt.payload.employment_duration)
            );
            Ok(())
        }
        Err(err) => {
            if let Some(errors) = err.validation_errors() {
                render_errors(&service, errors, "  ");
            }
            Err(err.into())
        }
    }
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config.export);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let forms = FormCsvReader::from_path(&args.csv)?;

    println!(
        "Employment batch: {} row(s) from {} (evaluated {})",
        forms.len(),
        args.csv.display(),
        today
    );

    let mut valid = 0usize;
    let mut projected_total = 0.0f64;
    for (index, form) in forms.iter().enumerate() {
        let row = index + 1;
        match service.validate(form, today) {
            Ok(record) => {
                let preview = service.preview(form, today);
                valid += 1;
                projected_total += preview.total_income;
                println!(
                    "- Row {row}: {} | {} | {}",
                    record.employer_name,
                    preview.formatted_total,
                    duration_label(&preview.employment_duration)
                );
            }
            Err(errors) => {
                println!("- Row {row}: invalid ({} field(s))", errors.len());
                render_errors(&service, &errors, "    ");
            }
        }
    }

    println!(
        "\n{valid} valid, {} invalid | projected total ${}",
        forms.len() - valid,
        format_whole_currency(projected_total)
    );

    Ok(())
}

fn render_preview(preview: &IncomePreview) {
    println!("- Total income: {}", preview.formatted_total);
    println!("- Employment years (accrual): {:.2}", preview.employment_years);
    println!("- Duration: {}", duration_label(&preview.employment_duration));
}

fn render_errors(service: &EmploymentFormService, errors: &ValidationErrors, indent: &str) {
    for (field, resolved) in errors.resolve(service.messages()) {
        println!("{indent}{field}: {} ({})", resolved.message, resolved.code);
    }
}

fn duration_label(duration: &str) -> String {
    match duration.parse::<f64>() {
        Ok(_) => format!("{duration} years"),
        Err(_) => duration.to_string(),
    }
}
