//! Shared domain vocabularies used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Wire names of every variant, in declaration order
            pub fn names() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownVariant { kind: $kind, value: other.to_string() }),
                }
            }
        }
    };
}

/// Billing category of a health plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanType {
    Particular,
    Convenio,
    Sus,
}

string_enum!(PlanType, "plan type", {
    Particular => "PARTICULAR",
    Convenio => "CONVENIO",
    Sus => "SUS",
});

/// Payment lifecycle of a physician fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pendente,
    Enviado,
    Pago,
    Glosado,
    Cancelado,  // Only reachable through a status update, never on creation
}

string_enum!(PaymentStatus, "payment status", {
    Pendente => "PENDENTE",
    Enviado => "ENVIADO",
    Pago => "PAGO",
    Glosado => "GLOSADO",
    Cancelado => "CANCELADO",
});

impl PaymentStatus {
    /// Statuses a fee payload may carry on creation
    pub const PAYLOAD: &'static [PaymentStatus] = &[
        PaymentStatus::Pendente,
        PaymentStatus::Enviado,
        PaymentStatus::Pago,
        PaymentStatus::Glosado,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Operador,
}

string_enum!(Role, "role", {
    Admin => "ADMIN",
    Operador => "OPERADOR",
});
