//! Tests de integración del endpoint de cotización

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use delivery_quote::clients::RoutingProvider;
use delivery_quote::config::{DeliveryConfig, EnvironmentConfig};
use delivery_quote::models::Coordinates;
use delivery_quote::routes::create_api_router;
use delivery_quote::services::DeliveryQuoteService;
use delivery_quote::state::AppState;
use delivery_quote::utils::errors::RoutingError;

/// Proveedor fijo: siempre la misma distancia (o siempre fallo)
struct FixedProvider {
    distance: Option<f64>,
    calls: AtomicUsize,
}

impl FixedProvider {
    fn distance(km: f64) -> Self {
        Self {
            distance: Some(km),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            distance: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RoutingProvider for FixedProvider {
    async fn distance_km(
        &self,
        _origin: Coordinates,
        _dest: Coordinates,
    ) -> Result<f64, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.distance
            .ok_or_else(|| RoutingError::Transport("connection refused".to_string()))
    }
}

fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        cors_origins: vec![],
        ors_api_key: "test-key".to_string(),
    }
}

fn create_test_app(provider: Arc<dyn RoutingProvider>) -> Router {
    let delivery = Arc::new(DeliveryQuoteService::new(
        DeliveryConfig::default(),
        provider,
    ));
    let state = AppState::new(test_config(), delivery);
    create_api_router().with_state(state)
}

fn json_quote_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/delivery/quote")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_quote_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/delivery/quote")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(Arc::new(FixedProvider::distance(10.0)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["service"], "delivery-quote");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_quote_near_fee_json() {
    let app = create_test_app(Arc::new(FixedProvider::distance(10.0)));

    let response = app
        .oneshot(json_quote_request(r#"{"lat": 30.0, "lng": 31.0}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["out_of_range"], false);
    assert_eq!(body["delivery_fee"], 50);
    assert_eq!(body["distance_km"], 10.0);
}

#[tokio::test]
async fn test_quote_accepts_string_coordinates() {
    let app = create_test_app(Arc::new(FixedProvider::distance(15.0)));

    let response = app
        .oneshot(json_quote_request(r#"{"lat": "30.0", "lng": "31.0"}"#))
        .await
        .unwrap();

    let body = response_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["delivery_fee"], 50);
}

#[tokio::test]
async fn test_quote_far_fee_form() {
    let app = create_test_app(Arc::new(FixedProvider::distance(40.0)));

    let response = app
        .oneshot(form_quote_request("lat=30.0&lng=31.0"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["out_of_range"], false);
    assert_eq!(body["delivery_fee"], 80);
}

#[tokio::test]
async fn test_quote_out_of_range() {
    let app = create_test_app(Arc::new(FixedProvider::distance(80.0)));

    let response = app
        .oneshot(form_quote_request("lat=30.0&lng=31.0"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["out_of_range"], true);
    assert_eq!(body["distance_km"], 80.0);
    assert!(body.get("delivery_fee").is_none());
}

#[tokio::test]
async fn test_quote_missing_coordinates() {
    let app = create_test_app(Arc::new(FixedProvider::distance(10.0)));

    let response = app.oneshot(form_quote_request("")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_quote_non_numeric_coordinates() {
    let app = create_test_app(Arc::new(FixedProvider::distance(10.0)));

    let response = app
        .oneshot(form_quote_request("lat=invalid&lng=31.0"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_quote_coordinates_outside_valid_range() {
    let app = create_test_app(Arc::new(FixedProvider::distance(10.0)));

    let response = app
        .oneshot(json_quote_request(r#"{"lat": 91.0, "lng": 31.0}"#))
        .await
        .unwrap();

    let body = response_json(response).await;
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn test_quote_upstream_failure() {
    let provider = Arc::new(FixedProvider::failing());
    let app = create_test_app(provider.clone());

    let response = app
        .oneshot(json_quote_request(r#"{"lat": 30.0, "lng": 31.0}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], false);
    assert!(body["error"].is_string());
    assert!(body.get("delivery_fee").is_none());
    assert!(body.get("distance_km").is_none());
    // 2 hubs x 2 intentos (reintento incluido)
    assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_repeated_quote_uses_cache() {
    let provider = Arc::new(FixedProvider::distance(15.0));
    let app = create_test_app(provider.clone());

    let first = app
        .clone()
        .oneshot(json_quote_request(r#"{"lat": 30.0, "lng": 31.0}"#))
        .await
        .unwrap();
    let first_body = response_json(first).await;
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);

    let second = app
        .oneshot(json_quote_request(r#"{"lat": 30.0, "lng": 31.0}"#))
        .await
        .unwrap();
    let second_body = response_json(second).await;

    // Sin llamadas nuevas al proveedor y mismo resultado
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    assert_eq!(first_body, second_body);
}
