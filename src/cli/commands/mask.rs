use clap::Subcommand;
use crate::cli::{utils, OutputFormat};
use crate::masks;

#[derive(Subcommand)]
pub enum MaskCommands {
    #[command(about = "Apply the CPF mask 000.000.000-00")]
    Cpf {
        #[arg(help = "Raw or partially typed CPF")]
        value: String,
    },

    #[command(about = "Apply the phone mask (00) 0000-0000 / (00) 00000-0000")]
    Phone {
        #[arg(help = "Raw or partially typed phone number")]
        value: String,
    },
}

pub fn handle(cmd: MaskCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        MaskCommands::Cpf { value } => {
            tracing::info!("Masking CPF input");
            utils::output_value(&output_format, "masked", &masks::mask_cpf(&value))
        }
        MaskCommands::Phone { value } => {
            tracing::info!("Masking phone input");
            utils::output_value(&output_format, "masked", &masks::mask_phone(&value))
        }
    }
}

pub fn handle_unmask(value: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    utils::output_value(&output_format, "digits", &masks::unmask(value))
}
