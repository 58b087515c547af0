pub mod batch;
pub mod corrections;
pub mod field_verifiers;
pub mod similarity;
pub mod validation;
pub mod warning;
