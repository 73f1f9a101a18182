//! DTOs de la API

pub mod delivery_dto;

pub use delivery_dto::*;
