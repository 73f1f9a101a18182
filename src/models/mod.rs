//! Modelos de dominio
//!
//! Este módulo contiene los tipos de dominio del servicio de delivery.

pub mod delivery;

pub use delivery::*;
