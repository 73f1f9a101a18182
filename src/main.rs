use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use dotenvy::dotenv;

use delivery_quote::clients::OrsMatrixClient;
use delivery_quote::config::{DeliveryConfig, EnvironmentConfig};
use delivery_quote::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use delivery_quote::routes::create_api_router;
use delivery_quote::services::DeliveryQuoteService;
use delivery_quote::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🛵 Delivery Quote Service");
    info!("=========================");

    let config = match EnvironmentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Error de configuración: {}", e);
            return Err(e);
        }
    };

    let delivery_config = DeliveryConfig::from_env()?;
    info!(
        "📍 {} hubs configurados, tarifas {}/{} EGP, radios {}/{} km",
        delivery_config.hubs.len(),
        delivery_config.near_fee,
        delivery_config.far_fee,
        delivery_config.near_km,
        delivery_config.max_km
    );

    let provider = OrsMatrixClient::new(
        config.ors_api_key.clone(),
        delivery_config.request_timeout,
    )
    .map_err(|e| anyhow::anyhow!("Error creando cliente ORS: {}", e))?;

    let delivery = Arc::new(DeliveryQuoteService::new(
        delivery_config,
        Arc::new(provider),
    ));

    let app_state = AppState::new(config.clone(), delivery);

    // En producción se restringen los orígenes; en desarrollo no
    let cors = if config.is_production() && !config.cors_origins.is_empty() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let app = create_api_router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr: SocketAddr = config.server_addr().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   POST /api/delivery/quote - Cotizar delivery (lat, lng)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
