use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub validation: ValidationConfig,
    pub fees: FeeConfig,
    pub output: OutputConfig,
    /// Rejected overrides, logged once a subscriber is installed
    #[serde(skip)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub strict_cpf: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Share of the net value passed to the physician when none is registered
    pub default_repasse_percent: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub log_filter: String,
    pub json: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("SGHM_STRICT_CPF") {
            match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => self.validation.strict_cpf = true,
                "false" | "0" => self.validation.strict_cpf = false,
                _ => self.reject("SGHM_STRICT_CPF", &v),
            }
        }

        if let Some(v) = lookup("SGHM_DEFAULT_REPASSE_PERCENT") {
            match Decimal::from_str(v.trim()) {
                Ok(p) if p >= Decimal::ZERO && p <= Decimal::ONE_HUNDRED => {
                    self.fees.default_repasse_percent = p;
                }
                _ => self.reject("SGHM_DEFAULT_REPASSE_PERCENT", &v),
            }
        }

        if let Some(v) = lookup("SGHM_LOG_FILTER") {
            self.output.log_filter = v;
        }
        if let Some(v) = lookup("SGHM_OUTPUT") {
            self.output.json = v.eq_ignore_ascii_case("json");
        }

        self
    }

    fn reject(&mut self, key: &str, value: &str) {
        self.warnings.push(format!("Ignoring invalid {key}: {value}"));
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            validation: ValidationConfig { strict_cpf: true },
            fees: FeeConfig {
                default_repasse_percent: Decimal::from(70),
            },
            output: OutputConfig {
                log_filter: "info".to_string(),
                json: false,
            },
            warnings: Vec::new(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            validation: ValidationConfig { strict_cpf: true },
            fees: FeeConfig {
                default_repasse_percent: Decimal::from(70),
            },
            output: OutputConfig {
                log_filter: "warn".to_string(),
                json: false,
            },
            warnings: Vec::new(),
        }
    }
}

// Global singleton config - initialized on first access
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(config.validation.strict_cpf);
        assert_eq!(config.fees.default_repasse_percent, Decimal::from(70));
        assert_eq!(config.output.log_filter, "info");
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.output.log_filter, "warn");
        assert!(!config.output.json);
    }

    fn overridden(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::development().with_overrides(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_valid_overrides_apply() {
        let config = overridden(&[
            ("SGHM_STRICT_CPF", "false"),
            ("SGHM_DEFAULT_REPASSE_PERCENT", " 65.5 "),
            ("SGHM_OUTPUT", "JSON"),
        ]);
        assert!(!config.validation.strict_cpf);
        assert_eq!(config.fees.default_repasse_percent, Decimal::from_str("65.5").unwrap());
        assert!(config.output.json);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_invalid_overrides_keep_defaults_and_warn() {
        let config = overridden(&[
            ("SGHM_STRICT_CPF", "sometimes"),
            ("SGHM_DEFAULT_REPASSE_PERCENT", "abc"),
        ]);
        assert!(config.validation.strict_cpf);
        assert_eq!(config.fees.default_repasse_percent, Decimal::from(70));
        assert_eq!(
            config.warnings,
            vec![
                "Ignoring invalid SGHM_STRICT_CPF: sometimes",
                "Ignoring invalid SGHM_DEFAULT_REPASSE_PERCENT: abc",
            ]
        );

        let out_of_range = overridden(&[("SGHM_DEFAULT_REPASSE_PERCENT", "150")]);
        assert_eq!(out_of_range.warnings.len(), 1);
    }
}
