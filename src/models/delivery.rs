//! Tipos de dominio para cotización de delivery
//!
//! Este módulo define las coordenadas, los hubs de despacho y el
//! resultado de aplicar la tabla de tarifas.

use serde::{Deserialize, Serialize};

/// Par de coordenadas geográficas (grados decimales)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Coordenadas redondeadas a 5 decimales, escaladas a enteros.
    /// Se usan como clave de cache: dos puntos que redondean igual
    /// comparten la misma distancia cacheada.
    pub fn rounded_e5(&self) -> (i64, i64) {
        (
            (self.lat * 100_000.0).round() as i64,
            (self.lng * 100_000.0).round() as i64,
        )
    }
}

/// Hub de despacho: punto fijo desde el que se mide la distancia.
/// Inmutable durante la vida del proceso.
#[derive(Debug, Clone)]
pub struct Hub {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Hub {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            coordinates: Coordinates::new(lat, lng),
        }
    }
}

/// Decisión de tarifa según la distancia al hub más cercano
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeDecision {
    /// Dentro del radio cercano
    Near { fee: u32 },
    /// Entre el radio cercano y el máximo
    Far { fee: u32 },
    /// Más allá del radio máximo: no hay delivery, no hay tarifa
    OutOfRange,
}

impl FeeDecision {
    pub fn fee(&self) -> Option<u32> {
        match self {
            FeeDecision::Near { fee } | FeeDecision::Far { fee } => Some(*fee),
            FeeDecision::OutOfRange => None,
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, FeeDecision::OutOfRange)
    }
}

/// Cotización calculada para un destino
#[derive(Debug, Clone, Copy)]
pub struct DeliveryQuote {
    /// Distancia por carretera al hub más cercano
    pub distance_km: f64,
    pub decision: FeeDecision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_e5_precision() {
        // Ambos redondean a 5 decimales al mismo punto
        let a = Coordinates::new(30.123456, 31.654321);
        let b = Coordinates::new(30.12346, 31.65432);
        assert_eq!(a.rounded_e5(), b.rounded_e5());

        // Un dígito distinto en el quinto decimal produce otra clave
        let c = Coordinates::new(30.12345, 31.65432);
        assert_ne!(c.rounded_e5(), a.rounded_e5());
    }

    #[test]
    fn test_fee_decision_accessors() {
        assert_eq!(FeeDecision::Near { fee: 50 }.fee(), Some(50));
        assert_eq!(FeeDecision::Far { fee: 80 }.fee(), Some(80));
        assert_eq!(FeeDecision::OutOfRange.fee(), None);
        assert!(FeeDecision::OutOfRange.is_out_of_range());
        assert!(!FeeDecision::Near { fee: 50 }.is_out_of_range());
    }
}
