//! Cache en memoria de distancias por carretera
//!
//! La clave combina el hub de origen y el destino, ambos redondeados
//! a 5 decimales. Una entrada vencida cuenta como ausente. Una carrera
//! entre dos requests solo provoca un recálculo redundante de la misma
//! distancia física, nunca un resultado incorrecto.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::models::Coordinates;

/// Clave de cache: (origen redondeado, destino redondeado)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DistanceKey {
    origin_e5: (i64, i64),
    dest_e5: (i64, i64),
}

impl DistanceKey {
    pub fn new(origin: &Coordinates, dest: &Coordinates) -> Self {
        Self {
            origin_e5: origin.rounded_e5(),
            dest_e5: dest.rounded_e5(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    distance_km: f64,
    inserted_at: Instant,
}

/// Cache de distancias con expiración por TTL
pub struct DistanceCache {
    ttl: Duration,
    entries: RwLock<HashMap<DistanceKey, CacheEntry>>,
}

impl DistanceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Obtener una distancia cacheada si existe y sigue vigente
    pub async fn get(&self, key: &DistanceKey) -> Option<f64> {
        let entries = self.entries.read().await;

        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                log::debug!("📦 Distance cache HIT: {:?}", key);
                Some(entry.distance_km)
            }
            Some(_) => {
                log::debug!("⏰ Distance cache EXPIRADO: {:?}", key);
                None
            }
            None => {
                log::debug!("❌ Distance cache MISS: {:?}", key);
                None
            }
        }
    }

    /// Guardar una distancia con el timestamp actual
    pub async fn insert(&self, key: DistanceKey, distance_km: f64) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                distance_km,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Eliminar las entradas vencidas; devuelve cuántas se purgaron
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
