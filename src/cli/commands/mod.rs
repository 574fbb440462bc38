pub mod check;
pub mod fee;
pub mod mask;
pub mod validate;
