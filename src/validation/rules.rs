use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::Source;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email regex"));

static PHONE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s()\-+]*$").expect("phone regex"));

/// How an optional field decides it is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Missing or null skips the chain
    Optional,
    /// Missing, null, empty string, `false` or `0` skips the chain
    OptionalFalsy,
}

#[derive(Debug, Clone)]
pub enum Sanitizer {
    Trim,
    NormalizeEmail,
}

#[derive(Debug, Clone)]
pub enum Check {
    NotEmpty,
    Length { min: usize, max: Option<usize> },
    Digits { min: usize, max: usize },
    DigitsExact(&'static [usize]),
    PhoneChars,
    Email,
    Iso8601,
    Int { min: Option<i64>, max: Option<i64> },
    Float { min: Option<f64>, max: Option<f64> },
    OneOf(Vec<&'static str>),
    PasswordStrength,
    Custom(fn(&str) -> bool),
}

#[derive(Debug, Clone)]
pub enum Step {
    Sanitize(Sanitizer),
    Check { check: Check, message: &'static str },
}

/// Rule chain for one named field, evaluated in declaration order
#[derive(Debug, Clone)]
pub struct Field {
    pub source: Source,
    pub name: &'static str,
    pub presence: Presence,
    pub steps: Vec<Step>,
}

impl Field {
    pub fn new(source: Source, name: &'static str) -> Self {
        Self {
            source,
            name,
            presence: Presence::Required,
            steps: Vec::new(),
        }
    }

    pub fn body(name: &'static str) -> Self {
        Self::new(Source::Body, name)
    }

    pub fn param(name: &'static str) -> Self {
        Self::new(Source::Params, name)
    }

    pub fn query(name: &'static str) -> Self {
        Self::new(Source::Query, name)
    }

    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    pub fn optional_falsy(mut self) -> Self {
        self.presence = Presence::OptionalFalsy;
        self
    }

    pub fn trim(mut self) -> Self {
        self.steps.push(Step::Sanitize(Sanitizer::Trim));
        self
    }

    pub fn normalize_email(mut self) -> Self {
        self.steps.push(Step::Sanitize(Sanitizer::NormalizeEmail));
        self
    }

    fn check(mut self, check: Check, message: &'static str) -> Self {
        self.steps.push(Step::Check { check, message });
        self
    }

    pub fn not_empty(self, message: &'static str) -> Self {
        self.check(Check::NotEmpty, message)
    }

    pub fn length(self, min: usize, max: usize, message: &'static str) -> Self {
        self.check(Check::Length { min, max: Some(max) }, message)
    }

    pub fn min_length(self, min: usize, message: &'static str) -> Self {
        self.check(Check::Length { min, max: None }, message)
    }

    pub fn max_length(self, max: usize, message: &'static str) -> Self {
        self.check(Check::Length { min: 0, max: Some(max) }, message)
    }

    pub fn digits(self, min: usize, max: usize, message: &'static str) -> Self {
        self.check(Check::Digits { min, max }, message)
    }

    pub fn digits_exact(self, lengths: &'static [usize], message: &'static str) -> Self {
        self.check(Check::DigitsExact(lengths), message)
    }

    pub fn phone_chars(self, message: &'static str) -> Self {
        self.check(Check::PhoneChars, message)
    }

    pub fn email(self, message: &'static str) -> Self {
        self.check(Check::Email, message)
    }

    pub fn iso8601(self, message: &'static str) -> Self {
        self.check(Check::Iso8601, message)
    }

    pub fn int_min(self, min: i64, message: &'static str) -> Self {
        self.check(Check::Int { min: Some(min), max: None }, message)
    }

    pub fn int_range(self, min: i64, max: i64, message: &'static str) -> Self {
        self.check(Check::Int { min: Some(min), max: Some(max) }, message)
    }

    pub fn float_min(self, min: f64, message: &'static str) -> Self {
        self.check(Check::Float { min: Some(min), max: None }, message)
    }

    pub fn float_range(self, min: f64, max: f64, message: &'static str) -> Self {
        self.check(Check::Float { min: Some(min), max: Some(max) }, message)
    }

    pub fn one_of(self, allowed: Vec<&'static str>, message: &'static str) -> Self {
        self.check(Check::OneOf(allowed), message)
    }

    pub fn password_strength(self, message: &'static str) -> Self {
        self.check(Check::PasswordStrength, message)
    }

    pub fn custom(self, predicate: fn(&str) -> bool, message: &'static str) -> Self {
        self.check(Check::Custom(predicate), message)
    }

    /// Whether the chain is skipped for this raw value
    pub fn skips(&self, value: Option<&Value>) -> bool {
        match self.presence {
            Presence::Required => false,
            Presence::Optional => matches!(value, None | Some(Value::Null)),
            Presence::OptionalFalsy => match value {
                None | Some(Value::Null) | Some(Value::Bool(false)) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(Value::Number(n)) => n.as_f64() == Some(0.0),
                _ => false,
            },
        }
    }

    /// Run the chain; returns the sanitized string or every failing message in order
    pub fn run(&self, value: Option<&Value>) -> Result<String, Vec<&'static str>> {
        let mut current = value_to_string(value);
        let mut failures = Vec::new();

        for step in &self.steps {
            match step {
                Step::Sanitize(Sanitizer::Trim) => current = current.trim().to_string(),
                Step::Sanitize(Sanitizer::NormalizeEmail) => current = current.to_lowercase(),
                Step::Check { check, message } => {
                    if !check.passes(&current) {
                        tracing::debug!(field = self.name, rule = *message, "validation rule failed");
                        failures.push(*message);
                    }
                }
            }
        }

        if failures.is_empty() {
            Ok(current)
        } else {
            Err(failures)
        }
    }

    pub fn has_sanitizer(&self) -> bool {
        self.steps.iter().any(|s| matches!(s, Step::Sanitize(_)))
    }
}

impl Check {
    pub fn passes(&self, value: &str) -> bool {
        match self {
            Check::NotEmpty => !value.is_empty(),
            Check::Length { min, max } => {
                let len = value.chars().count();
                len >= *min && max.map_or(true, |m| len <= m)
            }
            Check::Digits { min, max } => {
                let len = value.len();
                len >= *min && len <= *max && is_all_digits(value)
            }
            Check::DigitsExact(lengths) => {
                lengths.contains(&value.len()) && is_all_digits(value)
            }
            Check::PhoneChars => PHONE_CHARS_RE.is_match(value),
            Check::Email => EMAIL_RE.is_match(value),
            Check::Iso8601 => is_iso8601(value),
            Check::Int { min, max } => match value.parse::<i64>() {
                Ok(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
                Err(_) => false,
            },
            Check::Float { min, max } => match parse_float(value) {
                Some(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
                None => false,
            },
            Check::OneOf(allowed) => allowed.contains(&value),
            Check::PasswordStrength => {
                value.chars().any(|c| c.is_ascii_lowercase())
                    && value.chars().any(|c| c.is_ascii_uppercase())
                    && value.chars().any(|c| c.is_ascii_digit())
            }
            Check::Custom(predicate) => predicate(value),
        }
    }
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn parse_float(value: &str) -> Option<f64> {
    // Rust accepts "inf"/"NaN", form input does not
    if value.is_empty() || value.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_iso8601(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
}

/// String view of a JSON value, the way form validators coerce input
fn value_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int_coerces_strings() {
        let check = Check::Int { min: Some(1), max: None };
        assert!(check.passes("12"));
        assert!(!check.passes("0"));
        assert!(!check.passes("1.5"));
        assert!(!check.passes("abc"));
    }

    #[test]
    fn test_float_rejects_special_values() {
        let check = Check::Float { min: Some(0.0), max: None };
        assert!(check.passes("150.5"));
        assert!(check.passes("1e3"));
        assert!(!check.passes("inf"));
        assert!(!check.passes("NaN"));
        assert!(!check.passes("-1"));
    }

    #[test]
    fn test_iso8601_forms() {
        assert!(is_iso8601("2024-03-15"));
        assert!(is_iso8601("2024-03-15T10:30:00Z"));
        assert!(is_iso8601("2024-03-15T10:30:00.123"));
        assert!(!is_iso8601("15/03/2024"));
        assert!(!is_iso8601("2024-02-30"));
    }

    #[test]
    fn test_email_and_phone_chars() {
        assert!(Check::Email.passes("medico@sghm.com.br"));
        assert!(!Check::Email.passes("medico@sghm"));
        assert!(!Check::Email.passes("medico sghm@x.com"));
        assert!(Check::PhoneChars.passes("+55 (61) 99876-5432"));
        assert!(!Check::PhoneChars.passes("61 9876x5432"));
    }

    #[test]
    fn test_chain_collects_every_failure() {
        let field = Field::body("nome")
            .trim()
            .not_empty("obrigatório")
            .length(3, 255, "tamanho");
        assert_eq!(field.run(None), Err(vec!["obrigatório", "tamanho"]));
        assert_eq!(field.run(Some(&json!("  ab  "))), Err(vec!["tamanho"]));
        assert_eq!(field.run(Some(&json!("  Ana  "))), Ok("Ana".to_string()));
    }

    #[test]
    fn test_optional_presence() {
        let field = Field::body("x").optional();
        assert!(field.skips(None));
        assert!(field.skips(Some(&Value::Null)));
        assert!(!field.skips(Some(&json!(""))));

        let falsy = Field::body("x").optional_falsy();
        assert!(falsy.skips(Some(&json!(""))));
        assert!(falsy.skips(Some(&json!(0))));
        assert!(!falsy.skips(Some(&json!("2024-01-01"))));
    }
}
