pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "sghm")]
#[command(about = "SGHM CLI - masks, validators and fee calculation for hospital forms")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Format a value with the CPF or phone mask")]
    Mask {
        #[command(subcommand)]
        cmd: commands::mask::MaskCommands,
    },

    #[command(about = "Strip a value down to its digits")]
    Unmask {
        #[arg(help = "Value to unmask")]
        value: String,
    },

    #[command(about = "Check a CPF or phone number")]
    Validate {
        #[command(subcommand)]
        cmd: commands::validate::ValidateCommands,
    },

    #[command(about = "Validate an entity payload (JSON or YAML) from a file or stdin")]
    Check(commands::check::CheckArgs),

    #[command(about = "Calculate the physician share of a consultation fee")]
    Fee(commands::fee::FeeArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else if cli.text {
            OutputFormat::Text
        } else if crate::config::config().output.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Mask { cmd } => commands::mask::handle(cmd, output_format),
        Commands::Unmask { value } => commands::mask::handle_unmask(&value, output_format),
        Commands::Validate { cmd } => commands::validate::handle(cmd, output_format),
        Commands::Check(args) => commands::check::handle(args, output_format),
        Commands::Fee(args) => commands::fee::handle(args, output_format),
    }
}
