use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use rental_booking::config::environment::EnvironmentConfig;
use rental_booking::database::DatabaseConnection;
use rental_booking::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use rental_booking::routes;
use rental_booking::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Vehicle Rental Back-Office");
    info!("=============================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos y aplicar migraciones
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    let pool = db_connection.pool().clone();

    // CORS: permisivo en desarrollo, orígenes explícitos en producción
    let cors = if config.is_production() && !config.cors_origins.is_empty() {
        cors_middleware_with_origins(&config.cors_origins)
    } else {
        cors_middleware()
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(pool, config);

    let app = Router::new()
        .route("/health", get(health_check))
        .merge(routes::create_api_router())
        .layer(cors)
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("📅 Motor de reservas:");
    info!("   POST   /api/booking - Crear reserva");
    info!("   GET    /api/booking - Listar reservas (filtros)");
    info!("   GET    /api/booking/stats - Resumen por estado");
    info!("   POST   /api/booking/quote - Cotizar sin persistir");
    info!("   GET    /api/booking/:id - Obtener reserva");
    info!("   PUT    /api/booking/:id - Modificar reserva");
    info!("   PATCH  /api/booking/:id/status - Transición de estado");
    info!("   POST   /api/booking/bulk/status - Transición en bloque");
    info!("   PATCH  /api/booking/:id/notes - Notas de auditoría");
    info!("   DELETE /api/booking/:id - Purgar reserva");
    info!("   POST   /api/booking/:id/payments - Registrar pago");
    info!("   GET    /api/booking/:id/payments - Listar pagos");
    info!("🚗 Catálogos:");
    info!("   POST/GET /api/vehicle - Vehículos (+/:id, /:id/status)");
    info!("   POST/GET /api/branch - Sucursales (+/:id)");
    info!("   POST/GET /api/renter - Clientes (+/:id)");
    info!("   POST/GET /api/extra - Extras");

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

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "rental-booking",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
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
