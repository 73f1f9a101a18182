//! Rutas de delivery

use axum::{extract::State, routing::post, Json, Router};

use crate::dto::delivery_dto::{CoordinateInput, QuoteRequest, QuoteResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::JsonOrForm;

pub fn create_delivery_router() -> Router<AppState> {
    Router::new().route("/quote", post(quote_delivery))
}

/// POST /api/delivery/quote
///
/// Los fallos de cotización (coordenadas inválidas, proveedor caído)
/// viajan en el body como `{ok: false, error}` con status 200; el
/// mensaje al usuario final es responsabilidad del caller.
async fn quote_delivery(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let lat = request.lat.as_ref().and_then(CoordinateInput::as_f64);
    let lng = request.lng.as_ref().and_then(CoordinateInput::as_f64);

    let response = match state.delivery.quote(lat, lng).await {
        Ok(quote) => QuoteResponse::from_quote(&quote),
        Err(e) => QuoteResponse::failure(e.to_string()),
    };

    Ok(Json(response))
}
