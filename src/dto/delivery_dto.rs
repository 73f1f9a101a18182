//! DTOs del endpoint de cotización

use serde::{Deserialize, Serialize};

use crate::models::DeliveryQuote;

/// Valor de coordenada tal como llega en el body: los formularios
/// mandan strings ("30.0") y los clientes JSON pueden mandar número
/// o string. La validación real vive en el servicio.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Number(f64),
    Text(String),
}

impl CoordinateInput {
    /// `None` si el texto no es numérico
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CoordinateInput::Number(value) => Some(*value),
            CoordinateInput::Text(raw) => raw.trim().parse().ok(),
        }
    }
}

// Request de cotización (form o JSON)
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub lat: Option<CoordinateInput>,
    #[serde(default)]
    pub lng: Option<CoordinateInput>,
}

// Response de cotización. Siempre viaja con status 200; `ok` indica
// si hubo cotización. En out-of-range no se serializa delivery_fee.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_of_range: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QuoteResponse {
    pub fn from_quote(quote: &DeliveryQuote) -> Self {
        let distance_km = round2(quote.distance_km);

        if quote.decision.is_out_of_range() {
            Self {
                ok: true,
                out_of_range: Some(true),
                delivery_fee: None,
                distance_km: Some(distance_km),
                message: Some("Out of delivery range".to_string()),
                error: None,
            }
        } else {
            Self {
                ok: true,
                out_of_range: Some(false),
                delivery_fee: quote.decision.fee(),
                distance_km: Some(distance_km),
                message: None,
                error: None,
            }
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            ok: false,
            out_of_range: None,
            delivery_fee: None,
            distance_km: None,
            message: None,
            error: Some(error),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
