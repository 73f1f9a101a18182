//! Configuración del servicio de delivery
//!
//! Hubs de despacho, tabla de tarifas y parámetros del cache. Los
//! valores por defecto corresponden al despliegue de El Cairo (hubs
//! de Future City y Shubra, tarifas en EGP); todos se pueden
//! sobreescribir con variables de entorno.

use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

use crate::models::{FeeDecision, Hub};

/// Configuración de tarifas y distancias de delivery
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    pub hubs: Vec<Hub>,
    /// Tarifa dentro del radio cercano
    pub near_fee: u32,
    /// Tarifa entre el radio cercano y el máximo
    pub far_fee: u32,
    /// Radio cercano en km (inclusive)
    pub near_km: f64,
    /// Radio máximo de delivery en km (inclusive)
    pub max_km: f64,
    /// Vigencia de las distancias cacheadas
    pub cache_ttl: Duration,
    /// Timeout por llamada al proveedor de rutas
    pub request_timeout: Duration,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            hubs: vec![
                Hub::new("Future City", 30.1610413, 31.5609381),
                Hub::new("Shubra", 30.0809753, 31.2355689),
            ],
            near_fee: 50,
            far_fee: 80,
            near_km: 25.0,
            max_km: 70.0,
            cache_ttl: Duration::from_secs(600),
            request_timeout: Duration::from_secs(7),
        }
    }
}

impl DeliveryConfig {
    /// Cargar la configuración, tomando overrides del entorno
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("DELIVERY_HUBS") {
            config.hubs = parse_hubs(&raw)?;
        }
        if let Ok(raw) = env::var("DELIVERY_NEAR_FEE") {
            config.near_fee = raw.parse().context("DELIVERY_NEAR_FEE must be a number")?;
        }
        if let Ok(raw) = env::var("DELIVERY_FAR_FEE") {
            config.far_fee = raw.parse().context("DELIVERY_FAR_FEE must be a number")?;
        }
        if let Ok(raw) = env::var("DELIVERY_NEAR_KM") {
            config.near_km = raw.parse().context("DELIVERY_NEAR_KM must be a number")?;
        }
        if let Ok(raw) = env::var("DELIVERY_MAX_KM") {
            config.max_km = raw.parse().context("DELIVERY_MAX_KM must be a number")?;
        }
        if let Ok(raw) = env::var("DELIVERY_CACHE_TTL_SECS") {
            let secs: u64 = raw
                .parse()
                .context("DELIVERY_CACHE_TTL_SECS must be a number")?;
            config.cache_ttl = Duration::from_secs(secs);
        }

        if config.hubs.is_empty() {
            bail!("at least one delivery hub must be configured");
        }
        if config.near_km > config.max_km {
            bail!("DELIVERY_NEAR_KM must not exceed DELIVERY_MAX_KM");
        }

        Ok(config)
    }

    /// Aplicar la tabla de tarifas a una distancia efectiva.
    ///
    /// Los límites son inclusivos en la rama inferior: exactamente
    /// 25.0 km paga la tarifa cercana y exactamente 70.0 km la lejana.
    pub fn fee_for(&self, distance_km: f64) -> FeeDecision {
        if distance_km > self.max_km {
            FeeDecision::OutOfRange
        } else if distance_km <= self.near_km {
            FeeDecision::Near { fee: self.near_fee }
        } else {
            FeeDecision::Far { fee: self.far_fee }
        }
    }
}

/// Parsear hubs en formato "lat,lng;lat,lng"
fn parse_hubs(raw: &str) -> Result<Vec<Hub>> {
    let mut hubs = Vec::new();

    for (index, pair) in raw.split(';').filter(|s| !s.trim().is_empty()).enumerate() {
        let mut parts = pair.split(',');
        let (Some(lat), Some(lng)) = (parts.next(), parts.next()) else {
            bail!("DELIVERY_HUBS entry '{}' must be 'lat,lng'", pair);
        };
        let lat: f64 = lat
            .trim()
            .parse()
            .with_context(|| format!("invalid latitude in DELIVERY_HUBS entry '{}'", pair))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .with_context(|| format!("invalid longitude in DELIVERY_HUBS entry '{}'", pair))?;

        hubs.push(Hub::new(format!("hub-{}", index + 1), lat, lng));
    }

    Ok(hubs)
}
