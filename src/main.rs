use anyhow::Result;
use axum::{middleware as axum_middleware, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use criadero_backend::config::environment::EnvironmentConfig;
use criadero_backend::database;
use criadero_backend::middleware::auth::auth_middleware;
use criadero_backend::middleware::cors::cors_middleware;
use criadero_backend::routes;
use criadero_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🐎 Criadero - API de gestión");
    info!("============================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = database::connection::run_migrations(&pool).await {
        error!("❌ Error aplicando migraciones: {}", e);
        return Err(e);
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app_state = AppState::new(pool, config);

    // Rutas protegidas por el gate de autenticación
    let protected = Router::new()
        .nest("/api/client", routes::client_routes::create_client_router())
        .nest(
            "/api/specimen",
            routes::specimen_routes::create_specimen_router(),
        )
        .nest(
            "/api/contract",
            routes::contract_routes::create_contract_router(),
        )
        .nest(
            "/api/payment",
            routes::payment_routes::create_payment_router(),
        )
        .nest(
            "/api/service",
            routes::service_routes::create_service_router(),
        )
        .nest(
            "/api/category",
            routes::category_routes::create_category_router(),
        )
        .nest("/api/sede", routes::sede_routes::create_sede_router())
        .nest("/api/role", routes::role_routes::create_role_router())
        .nest("/api/user", routes::user_routes::create_user_router())
        .nest("/api/care", routes::care_routes::create_care_router())
        .nest(
            "/api/dashboard",
            routes::dashboard_routes::create_dashboard_router(),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .merge(protected)
        .layer(cors_middleware())
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   POST /api/auth/login - Autenticación");
    info!("👥 Clientes:      /api/client (GET/POST/PUT/DELETE, purge, reactivate)");
    info!("🐴 Ejemplares:    /api/specimen (CRUD + relocate)");
    info!("📋 Contratos:     /api/contract (CRUD transaccional)");
    info!("💰 Pagos:         /api/payment (GET/POST/PUT, por contrato)");
    info!("🛠  Servicios:     /api/service (CRUD + status)");
    info!("🏷  Categorías:    /api/category (CRUD + status)");
    info!("🏠 Sedes:         /api/sede (CRUD)");
    info!("🔐 Roles:         /api/role (CRUD + permisos)");
    info!("👤 Usuarios:      /api/user (CRUD + status)");
    info!("💊 Cuidado:       /api/care (medicinas, vacunaciones, alimentación)");
    info!("📊 Dashboard:     /api/dashboard");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de salud simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "criadero-backend",
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
