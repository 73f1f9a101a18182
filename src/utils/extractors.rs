//! Extractores personalizados de Axum
//!
//! El endpoint de cotización acepta tanto JSON como form-urlencoded
//! (el frontend original enviaba formularios; los clientes nuevos
//! mandan JSON). Este extractor decide según el Content-Type.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use super::errors::AppError;

/// Deserializa el body como JSON o como formulario según el Content-Type
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(format!("invalid form body: {}", e)))?;
            Ok(Self(value))
        }
    }
}
