// Physician fee ("honorário") arithmetic
//
// Net value is the consultation value minus the insurer's denial (glosa);
// the physician receives a percentage of the net value, rounded to cents.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::PaymentStatus;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeError {
    #[error("Valor da consulta deve ser maior que zero")]
    NonPositiveConsultation,

    #[error("Valor da glosa deve ser um número positivo")]
    NegativeGlosa,

    #[error("Glosa de {glosa} excede o valor da consulta {consulta}")]
    GlosaExceedsConsultation { glosa: Decimal, consulta: Decimal },

    #[error("Percentual deve estar entre 0 e 100, recebido {0}")]
    InvalidPercent(Decimal),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeInput {
    pub valor_consulta: Decimal,
    #[serde(default)]
    pub valor_glosa: Decimal,
    #[serde(default)]
    pub percentual_repasse: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub valor_consulta: Decimal,
    pub valor_glosa: Decimal,
    pub valor_liquido: Decimal,
    pub percentual_repasse: Decimal,
    pub valor_repasse_medico: Decimal,
    pub status_inicial: PaymentStatus,
}

/// Round half away from zero and always carry two decimal places
fn round_cents(value: Decimal) -> Decimal {
    let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    cents
}

pub fn calculate_fee(input: &FeeInput, default_percent: Decimal) -> Result<FeeBreakdown, FeeError> {
    if input.valor_consulta <= Decimal::ZERO {
        return Err(FeeError::NonPositiveConsultation);
    }
    if input.valor_glosa < Decimal::ZERO {
        return Err(FeeError::NegativeGlosa);
    }
    if input.valor_glosa > input.valor_consulta {
        return Err(FeeError::GlosaExceedsConsultation {
            glosa: input.valor_glosa,
            consulta: input.valor_consulta,
        });
    }

    // A physician registered with 0% falls back to the default, as unset does
    let percent = match input.percentual_repasse {
        Some(p) if !p.is_zero() => p,
        _ => default_percent,
    };
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(FeeError::InvalidPercent(percent));
    }

    let valor_liquido = input.valor_consulta - input.valor_glosa;
    let valor_repasse_medico = round_cents(valor_liquido * percent / Decimal::ONE_HUNDRED);
    let status_inicial = if input.valor_glosa > Decimal::ZERO {
        PaymentStatus::Glosado
    } else {
        PaymentStatus::Pendente
    };

    tracing::debug!(
        %valor_liquido,
        %percent,
        %valor_repasse_medico,
        status = %status_inicial,
        "fee calculated"
    );

    Ok(FeeBreakdown {
        valor_consulta: input.valor_consulta,
        valor_glosa: input.valor_glosa,
        valor_liquido,
        percentual_repasse: percent,
        valor_repasse_medico,
        status_inicial,
    })
}

/// Denied share of the billed total, as an unrounded percentage
pub fn glosa_rate(total_glosa: Decimal, total_consulta: Decimal) -> Decimal {
    if total_consulta.is_zero() {
        return Decimal::ZERO;
    }
    total_glosa * Decimal::ONE_HUNDRED / total_consulta
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSummary {
    pub quantidade: usize,
    pub valor_consulta: Decimal,
    pub valor_glosas: Decimal,
    pub valor_liquido: Decimal,
    pub valor_repasse: Decimal,
    pub taxa_glosa: Decimal,
}

impl FeeSummary {
    pub fn from_breakdowns<'a>(items: impl IntoIterator<Item = &'a FeeBreakdown>) -> Self {
        let mut summary = items.into_iter().fold(Self::default(), |mut acc, fee| {
            acc.quantidade += 1;
            acc.valor_consulta += fee.valor_consulta;
            acc.valor_glosas += fee.valor_glosa;
            acc.valor_liquido += fee.valor_liquido;
            acc.valor_repasse += fee.valor_repasse_medico;
            acc
        });
        summary.taxa_glosa = glosa_rate(summary.valor_glosas, summary.valor_consulta);
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status_anterior: PaymentStatus,
    pub status_novo: PaymentStatus,
}

impl StatusChange {
    /// Any status may be set from any other, including itself
    pub fn new(from: PaymentStatus, to: PaymentStatus) -> Self {
        Self {
            status_anterior: from,
            status_novo: to,
        }
    }

    /// History line recorded alongside the change
    pub fn describe(&self) -> String {
        format!("Status alterado de {} para {}", self.status_anterior, self.status_novo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn input(consulta: &str, glosa: &str, percent: Option<&str>) -> FeeInput {
        FeeInput {
            valor_consulta: dec(consulta),
            valor_glosa: dec(glosa),
            percentual_repasse: percent.map(dec),
        }
    }

    #[test]
    fn test_default_percent_without_glosa() {
        let fee = calculate_fee(&input("200.00", "0", None), dec("70")).unwrap();
        assert_eq!(fee.valor_liquido, dec("200.00"));
        assert_eq!(fee.valor_repasse_medico, dec("140.00"));
        assert_eq!(fee.status_inicial, PaymentStatus::Pendente);
    }

    #[test]
    fn test_glosa_marks_status_and_reduces_net() {
        let fee = calculate_fee(&input("150.00", "30.00", Some("60")), dec("70")).unwrap();
        assert_eq!(fee.valor_liquido, dec("120.00"));
        assert_eq!(fee.valor_repasse_medico, dec("72.00"));
        assert_eq!(fee.status_inicial, PaymentStatus::Glosado);
    }

    #[test]
    fn test_rounding_half_up_to_cents() {
        // 0.125 sits on the midpoint
        let fee = calculate_fee(&input("0.25", "0", Some("50")), dec("70")).unwrap();
        assert_eq!(fee.valor_repasse_medico, dec("0.13"));
    }

    #[test]
    fn test_zero_percent_uses_default() {
        let fee = calculate_fee(&input("100", "0", Some("0")), dec("70")).unwrap();
        assert_eq!(fee.percentual_repasse, dec("70"));
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            calculate_fee(&input("0", "0", None), dec("70")),
            Err(FeeError::NonPositiveConsultation)
        );
        assert_eq!(
            calculate_fee(&input("100", "-1", None), dec("70")),
            Err(FeeError::NegativeGlosa)
        );
        assert!(matches!(
            calculate_fee(&input("100", "101", None), dec("70")),
            Err(FeeError::GlosaExceedsConsultation { .. })
        ));
        assert_eq!(
            calculate_fee(&input("100", "0", Some("120")), dec("70")),
            Err(FeeError::InvalidPercent(dec("120")))
        );
    }

    #[test]
    fn test_summary_and_rate() {
        let fees = vec![
            calculate_fee(&input("200", "0", None), dec("70")).unwrap(),
            calculate_fee(&input("100", "50", None), dec("70")).unwrap(),
        ];
        let summary = FeeSummary::from_breakdowns(&fees);
        assert_eq!(summary.quantidade, 2);
        assert_eq!(summary.valor_consulta, dec("300"));
        assert_eq!(summary.valor_glosas, dec("50"));
        assert_eq!(summary.valor_repasse, dec("175"));
        assert_eq!(summary.taxa_glosa.round_dp(4), dec("16.6667"));
        assert_eq!(glosa_rate(dec("50"), dec("200")), dec("25"));
        assert_eq!(glosa_rate(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_status_changes_are_unrestricted() {
        let change = StatusChange::new(PaymentStatus::Enviado, PaymentStatus::Pago);
        assert_eq!(change.describe(), "Status alterado de ENVIADO para PAGO");

        let reopened = StatusChange::new(PaymentStatus::Pago, PaymentStatus::Pendente);
        assert_eq!(reopened.describe(), "Status alterado de PAGO para PENDENTE");

        let revived = StatusChange::new(PaymentStatus::Cancelado, PaymentStatus::Pendente);
        assert_eq!(revived.status_novo, PaymentStatus::Pendente);

        let same = StatusChange::new(PaymentStatus::Enviado, PaymentStatus::Enviado);
        assert_eq!(same.describe(), "Status alterado de ENVIADO para ENVIADO");
    }
}
