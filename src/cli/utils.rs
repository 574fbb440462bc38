use serde_json::{json, Value};
use crate::cli::OutputFormat;
use crate::error::SghmError;
use crate::validation::ValidationReport;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(obj), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                obj.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }
            if let (Some(obj), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                obj.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output a crate error with its code; validation reports carry their field details
pub fn output_sghm_error(
    output_format: &OutputFormat,
    err: &SghmError,
    extra: Option<Value>,
) -> anyhow::Result<()> {
    match (output_format, err) {
        (OutputFormat::Text, SghmError::Validation(report)) => {
            print_report(report);
            Ok(())
        }
        (_, SghmError::Validation(report)) => {
            let mut data = json!({ "details": report.details });
            if let (Some(obj), Some(Value::Object(more))) = (data.as_object_mut(), extra) {
                obj.extend(more);
            }
            output_error(output_format, &err.to_string(), Some(err.error_code()), Some(data))
        }
        _ => output_error(output_format, &err.to_string(), Some(err.error_code()), extra),
    }
}

/// One line per invalid field, its messages in reported order
fn print_report(report: &ValidationReport) {
    eprintln!("{}", report.error);
    for campo in report.fields() {
        let messages: Vec<&str> = report
            .details
            .iter()
            .filter(|d| d.campo == campo)
            .map(|d| d.mensagem.as_str())
            .collect();
        eprintln!("  - {}: {}", campo, messages.join("; "));
    }
}

/// Output a single value, bare in text mode or under `key` in JSON mode
pub fn output_value(output_format: &OutputFormat, key: &str, value: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ key: value }))?);
        }
        OutputFormat::Text => {
            println!("{}", value);
        }
    }
    Ok(())
}
