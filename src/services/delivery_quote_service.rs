//! Servicio de cotización de delivery
//!
//! Dado un par de coordenadas, calcula la distancia por carretera al
//! hub más cercano (con cache y reintento) y aplica la tabla de
//! tarifas. Todos los fallos se devuelven como valores estructurados;
//! ninguno se propaga como panic al handler.

use std::future::Future;
use std::sync::Arc;

use crate::cache::{DistanceCache, DistanceKey};
use crate::clients::RoutingProvider;
use crate::config::DeliveryConfig;
use crate::models::{Coordinates, DeliveryQuote};
use crate::utils::errors::{QuoteError, RoutingError};
use crate::utils::validation;

/// Intentos máximos por hub: la llamada original más un reintento
const MAX_ATTEMPTS: u32 = 2;

/// Servicio de cotización. Posee su cache y su proveedor inyectado;
/// los handlers lo reciben por `AppState`, sin estado global.
pub struct DeliveryQuoteService {
    config: DeliveryConfig,
    cache: DistanceCache,
    provider: Arc<dyn RoutingProvider>,
}

impl DeliveryQuoteService {
    pub fn new(config: DeliveryConfig, provider: Arc<dyn RoutingProvider>) -> Self {
        let cache = DistanceCache::new(config.cache_ttl);
        Self {
            config,
            cache,
            provider,
        }
    }

    /// Cotizar el delivery hacia unas coordenadas.
    ///
    /// `lat` y `lng` llegan como `Option` porque el body puede venir
    /// incompleto o con valores no numéricos; ambos casos son
    /// `InvalidCoordinates`.
    pub async fn quote(
        &self,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> Result<DeliveryQuote, QuoteError> {
        let dest = validate_destination(lat, lng)?;

        let distance_km = self.distance_from_nearest_hub(dest).await?;
        let decision = self.config.fee_for(distance_km);

        log::info!(
            "💰 Cotización: {:.2} km -> {:?}",
            distance_km,
            decision.fee()
        );

        Ok(DeliveryQuote {
            distance_km,
            decision,
        })
    }

    /// Distancia mínima entre el destino y los hubs configurados.
    ///
    /// Cada hub se consulta en el cache primero; en un miss se llama
    /// al proveedor con reintento y el resultado se cachea. Si ningún
    /// hub entrega una distancia, la cotización completa falla.
    async fn distance_from_nearest_hub(&self, dest: Coordinates) -> Result<f64, QuoteError> {
        let mut min_distance: Option<f64> = None;
        let mut last_error: Option<RoutingError> = None;

        for hub in &self.config.hubs {
            let key = DistanceKey::new(&hub.coordinates, &dest);

            let distance = if let Some(cached) = self.cache.get(&key).await {
                cached
            } else {
                let origin = hub.coordinates;
                let result = with_retry(MAX_ATTEMPTS, || {
                    self.provider.distance_km(origin, dest)
                })
                .await;

                match result {
                    Ok(distance) => {
                        self.cache.insert(key, distance).await;
                        distance
                    }
                    Err(e) => {
                        log::error!("❌ Distancia no disponible desde hub {}: {}", hub.name, e);
                        last_error = Some(e);
                        continue;
                    }
                }
            };

            min_distance = Some(match min_distance {
                Some(current) => current.min(distance),
                None => distance,
            });
        }

        min_distance.ok_or_else(|| match last_error {
            // Un timeout es "no pudimos calcular"; el resto de la
            // taxonomía de routing se reporta como fallo del upstream
            Some(RoutingError::Timeout) | None => QuoteError::DistanceUnavailable,
            Some(error) => QuoteError::Upstream(error.to_string()),
        })
    }
}

fn validate_destination(lat: Option<f64>, lng: Option<f64>) -> Result<Coordinates, QuoteError> {
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Err(QuoteError::InvalidCoordinates(
            "lat and lng are required".to_string(),
        ));
    };

    validation::validate_coordinates(lat, lng)
        .map_err(|e| QuoteError::InvalidCoordinates(format!("{} out of range", e.code)))?;

    Ok(Coordinates::new(lat, lng))
}

/// Política de reintento acotada: hasta `max_attempts` llamadas, sin
/// backoff, parametrizada en la función de red.
async fn with_retry<F, Fut>(max_attempts: u32, mut call: F) -> Result<f64, RoutingError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<f64, RoutingError>>,
{
    let mut attempt = 1;
    loop {
        match call().await {
            Ok(distance) => return Ok(distance),
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(e) => {
                log::warn!(
                    "🔁 Reintentando consulta de distancia (intento {}/{}): {}",
                    attempt,
                    max_attempts,
                    e
                );
                attempt += 1;
            }
        }
    }
}
