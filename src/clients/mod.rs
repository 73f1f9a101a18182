//! Clientes de APIs externas
//!
//! El proveedor de rutas está detrás de un trait para que el resto
//! del sistema no dependa de un proveedor concreto: elegir otro es un
//! detalle de configuración, no otro camino de código.

pub mod ors_client;

pub use ors_client::OrsMatrixClient;

use async_trait::async_trait;

use crate::models::Coordinates;
use crate::utils::errors::RoutingError;

/// Proveedor de distancias por carretera
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Distancia en kilómetros conduciendo de `origin` a `dest`
    async fn distance_km(&self, origin: Coordinates, dest: Coordinates)
        -> Result<f64, RoutingError>;
}
