pub mod cli;
pub mod config;
pub mod error;
pub mod honorarios;
pub mod identifiers;
pub mod masks;
pub mod types;
pub mod validation;

pub use error::SghmError;
pub use identifiers::{Cpf, IdentifierError, Phone};
pub use masks::{mask_cpf, mask_phone, unmask, validate_cpf, validate_phone};
