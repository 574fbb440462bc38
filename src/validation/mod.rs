// Payload validation for SGHM entities
//
// A `Validator` is an ordered list of field rule chains. Checking a
// request either yields the sanitized request or a report listing every
// failing rule, grouped by field in declaration order.

pub mod rules;
pub mod schemas;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use rules::Field;
pub use schemas::{validator_for, validator_for_with, ValidatorOptions, VALIDATORS};

pub const VALIDATION_ERROR: &str = "Erro de validação";

/// Part of the request a field is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Body,
    Params,
    Query,
}

/// The three payload locations a validator can inspect
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub body: Map<String, Value>,
    #[serde(default)]
    pub params: Map<String, Value>,
    #[serde(default)]
    pub query: Map<String, Value>,
}

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Section '{0}' must be an object")]
    InvalidSection(&'static str),
}

impl Request {
    pub fn from_body(body: Map<String, Value>) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    /// Accept either an envelope `{body, params, query}` or a bare body object
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        let mut obj = match value {
            Value::Object(obj) => obj,
            other => return Err(PayloadError::NotAnObject(json_kind(&other))),
        };

        let is_envelope = ["body", "params", "query"]
            .iter()
            .any(|k| obj.get(*k).map_or(false, Value::is_object));
        if !is_envelope {
            return Ok(Self::from_body(obj));
        }

        let mut take = |key: &'static str| -> Result<Map<String, Value>, PayloadError> {
            match obj.remove(key) {
                None | Some(Value::Null) => Ok(Map::new()),
                Some(Value::Object(section)) => Ok(section),
                Some(_) => Err(PayloadError::InvalidSection(key)),
            }
        };

        Ok(Self {
            body: take("body")?,
            params: take("params")?,
            query: take("query")?,
        })
    }

    pub fn section(&self, source: Source) -> &Map<String, Value> {
        match source {
            Source::Body => &self.body,
            Source::Params => &self.params,
            Source::Query => &self.query,
        }
    }

    fn section_mut(&mut self, source: Source) -> &mut Map<String, Value> {
        match source {
            Source::Body => &mut self.body,
            Source::Params => &mut self.params,
            Source::Query => &mut self.query,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub campo: String,
    pub mensagem: String,
}

/// Wire shape returned to clients when a payload fails validation
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{error}: {}", summarize(.details))]
pub struct ValidationReport {
    pub error: String,
    pub details: Vec<FieldError>,
}

fn summarize(details: &[FieldError]) -> String {
    details
        .iter()
        .map(|d| format!("{} ({})", d.mensagem, d.campo))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationReport {
    pub fn new(details: Vec<FieldError>) -> Self {
        Self {
            error: VALIDATION_ERROR.to_string(),
            details,
        }
    }

    /// Invalid field names, each listed once
    pub fn fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.details.iter().map(|d| d.campo.as_str()).collect();
        names.dedup();
        names
    }

    /// First message reported for a field
    pub fn message_for(&self, campo: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|d| d.campo == campo)
            .map(|d| d.mensagem.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Validator {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Validator {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Validate every field; on success return the request with sanitized strings written back
    pub fn check(&self, request: &Request) -> Result<Request, ValidationReport> {
        let mut sanitized = request.clone();
        let mut details = Vec::new();

        for field in &self.fields {
            let raw = request.section(field.source).get(field.name);
            if field.skips(raw) {
                continue;
            }

            match field.run(raw) {
                Ok(value) => {
                    if field.has_sanitizer() && matches!(raw, Some(Value::String(_))) {
                        sanitized
                            .section_mut(field.source)
                            .insert(field.name.to_string(), Value::String(value));
                    }
                }
                Err(messages) => details.extend(messages.into_iter().map(|message| FieldError {
                    campo: field.name.to_string(),
                    mensagem: message.to_string(),
                })),
            }
        }

        if details.is_empty() {
            tracing::debug!(validator = %self.name, "payload accepted");
            Ok(sanitized)
        } else {
            tracing::debug!(validator = %self.name, errors = details.len(), "payload rejected");
            Err(ValidationReport::new(details))
        }
    }
}
