//! Utilidades compartidas

pub mod errors;
pub mod extractors;
pub mod validation;
