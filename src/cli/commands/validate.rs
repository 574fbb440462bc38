use clap::Subcommand;
use serde_json::json;

use crate::cli::{utils, OutputFormat};
use crate::identifiers::{Cpf, Phone};

#[derive(Subcommand)]
pub enum ValidateCommands {
    #[command(about = "Check CPF length and check digits")]
    Cpf {
        #[arg(help = "CPF, masked or not")]
        value: String,
    },

    #[command(about = "Check that a phone number has 10 or 11 digits")]
    Phone {
        #[arg(help = "Phone number, masked or not")]
        value: String,
    },
}

pub fn handle(cmd: ValidateCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ValidateCommands::Cpf { value } => {
            tracing::info!("Validating CPF");
            match Cpf::parse(&value) {
                Ok(cpf) => utils::output_success(
                    &output_format,
                    &format!("CPF válido: {}", cpf),
                    Some(json!({ "valid": true, "digits": cpf.digits(), "masked": cpf.masked() })),
                ),
                Err(e) => {
                    utils::output_error(
                        &output_format,
                        &format!("CPF inválido: {}", e),
                        Some("INVALID_IDENTIFIER"),
                        Some(json!({ "valid": false })),
                    )?;
                    Err(anyhow::anyhow!("CPF inválido"))
                }
            }
        }
        ValidateCommands::Phone { value } => {
            tracing::info!("Validating phone");
            match Phone::parse(&value) {
                Ok(phone) => utils::output_success(
                    &output_format,
                    &format!("Telefone válido: {}", phone),
                    Some(json!({
                        "valid": true,
                        "digits": phone.digits(),
                        "masked": phone.masked(),
                        "mobile": phone.is_mobile()
                    })),
                ),
                Err(e) => {
                    utils::output_error(
                        &output_format,
                        &format!("Telefone inválido: {}", e),
                        Some("INVALID_IDENTIFIER"),
                        Some(json!({ "valid": false })),
                    )?;
                    Err(anyhow::anyhow!("Telefone inválido"))
                }
            }
        }
    }
}
