//! Servicios de negocio

pub mod delivery_quote_service;

pub use delivery_quote_service::DeliveryQuoteService;
