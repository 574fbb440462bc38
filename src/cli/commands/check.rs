use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde_json::{json, Value};

use crate::cli::{utils, OutputFormat};
use crate::error::SghmError;
use crate::validation::{validator_for, Request, VALIDATORS};

#[derive(Args)]
pub struct CheckArgs {
    #[arg(help = "Entity name (medico, paciente, consulta, plano, honorario, auth, query)")]
    pub entity: String,
    #[arg(help = "Action name (create, update, delete, login, pagination, ...)")]
    pub action: String,
    #[arg(long, help = "Payload file; reads stdin when omitted")]
    pub file: Option<PathBuf>,
}

/// Parse a payload as JSON, or as YAML when the file says so or JSON fails
pub fn parse_payload(text: &str, path: Option<&Path>) -> Result<Value, SghmError> {
    let is_yaml = path
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map_or(false, |e| matches!(e, "yaml" | "yml"));

    if is_yaml {
        return Ok(serde_yaml::from_str(text)?);
    }

    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            tracing::debug!("Payload is not JSON ({}), trying YAML", json_err);
            serde_yaml::from_str(text).map_err(|_| SghmError::from(json_err))
        }
    }
}

pub fn check_payload(entity: &str, action: &str, payload: Value) -> Result<Request, SghmError> {
    let validator = validator_for(entity, action).ok_or_else(|| SghmError::UnknownValidator {
        entity: entity.to_string(),
        action: action.to_string(),
    })?;
    let request = Request::from_value(payload)?;
    Ok(validator.check(&request)?)
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read payload from stdin")?;
            Ok(buf)
        }
    }
}

fn known_validators() -> String {
    VALIDATORS
        .iter()
        .flat_map(|(entity, actions)| actions.iter().map(move |a| format!("{entity}.{a}")))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn handle(args: CheckArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    tracing::info!("Checking {}.{} payload", args.entity, args.action);

    let text = read_input(args.file.as_deref())?;
    let result = parse_payload(&text, args.file.as_deref())
        .and_then(|payload| check_payload(&args.entity, &args.action, payload));

    match result {
        Ok(sanitized) => utils::output_success(
            &output_format,
            &format!("Payload {}.{} válido", args.entity, args.action),
            Some(json!({ "payload": sanitized })),
        ),
        Err(err) => {
            let extra = matches!(err, SghmError::UnknownValidator { .. })
                .then(|| json!({ "known": known_validators() }));
            utils::output_sghm_error(&output_format, &err, extra)?;
            Err(err.into())
        }
    }
}
