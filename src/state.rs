//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El servicio de cotización se construye
//! una vez al arrancar; no hay singletons globales.

use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::services::DeliveryQuoteService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub delivery: Arc<DeliveryQuoteService>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, delivery: Arc<DeliveryQuoteService>) -> Self {
        Self { config, delivery }
    }
}
