//! Cache de distancias
//!
//! Cache en memoria con TTL para las distancias hub → destino. Es
//! puramente una optimización para reducir llamadas al proveedor de
//! rutas, nunca una fuente de verdad.

pub mod distance_cache;

pub use distance_cache::{DistanceCache, DistanceKey};
