pub mod label;
pub mod verification;
