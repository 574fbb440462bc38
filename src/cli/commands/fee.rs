use clap::Args;
use rust_decimal::Decimal;
use serde_json::json;

use crate::cli::{utils, OutputFormat};
use crate::honorarios::{calculate_fee, FeeInput};

#[derive(Args)]
pub struct FeeArgs {
    #[arg(long, help = "Consultation value billed to the plan")]
    pub consulta: Decimal,
    #[arg(long, default_value = "0", help = "Value denied by the plan (glosa)")]
    pub glosa: Decimal,
    #[arg(long, help = "Physician share in percent (defaults to SGHM_DEFAULT_REPASSE_PERCENT)")]
    pub percent: Option<Decimal>,
}

pub fn handle(args: FeeArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let input = FeeInput {
        valor_consulta: args.consulta,
        valor_glosa: args.glosa,
        percentual_repasse: args.percent,
    };
    let default_percent = crate::config::config().fees.default_repasse_percent;
    tracing::info!("Calculating fee with default repasse {}%", default_percent);

    let fee = calculate_fee(&input, default_percent)?;

    match output_format {
        OutputFormat::Json => utils::output_success(
            &output_format,
            "Honorário calculado",
            Some(json!({ "honorario": fee })),
        ),
        OutputFormat::Text => {
            println!("Valor da consulta:  R$ {:.2}", fee.valor_consulta);
            println!("Glosa:              R$ {:.2}", fee.valor_glosa);
            println!("Valor líquido:      R$ {:.2}", fee.valor_liquido);
            println!("Repasse ({}%):      R$ {:.2}", fee.percentual_repasse, fee.valor_repasse_medico);
            println!("Status inicial:     {}", fee.status_inicial);
            Ok(())
        }
    }
}
