use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::masks::{self, all_same, cpf_check_digits, cpf_digits, mask_cpf, mask_phone, unmask};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Expected {expected} digits, found {found}")]
    WrongLength { expected: &'static str, found: usize },

    #[error("All digits are identical")]
    RepeatedDigits,

    #[error("Check digit at position {position} does not match")]
    CheckDigitMismatch { position: usize },
}

/// A CPF whose length and check digits have been verified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpf([u8; 11]);

impl Cpf {
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let digits = cpf_digits(input).ok_or_else(|| IdentifierError::WrongLength {
            expected: "11",
            found: unmask(input).len(),
        })?;

        if all_same(&digits) {
            return Err(IdentifierError::RepeatedDigits);
        }

        let mut base = [0u8; 9];
        base.copy_from_slice(&digits[..9]);
        let (first, second) = cpf_check_digits(&base);

        if first != digits[9] {
            return Err(IdentifierError::CheckDigitMismatch { position: 10 });
        }
        if second != digits[10] {
            return Err(IdentifierError::CheckDigitMismatch { position: 11 });
        }

        Ok(Self(digits))
    }

    /// Raw 11-digit form, as stored by the backend
    pub fn digits(&self) -> String {
        self.0.iter().map(|d| char::from(b'0' + d)).collect()
    }

    pub fn masked(&self) -> String {
        mask_cpf(&self.digits())
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl FromStr for Cpf {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Cpf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.digits())
    }
}

impl<'de> Deserialize<'de> for Cpf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Cpf::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A phone number with 10 (landline) or 11 (mobile) digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let digits = unmask(input);
        if !masks::validate_phone(&digits) {
            return Err(IdentifierError::WrongLength {
                expected: "10 or 11",
                found: digits.len(),
            });
        }
        Ok(Self(digits))
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn area_code(&self) -> &str {
        &self.0[..2]
    }

    pub fn is_mobile(&self) -> bool {
        self.0.len() == masks::MAX_DIGITS
    }

    pub fn masked(&self) -> String {
        mask_phone(&self.0)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl FromStr for Phone {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Phone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Phone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Phone::parse(&raw).map_err(serde::de::Error::custom)
    }
}
