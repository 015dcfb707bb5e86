//! Configuración de CORS

use tower_http::cors::{Any, CorsLayer};

/// Capa CORS permisiva para el frontend de administración
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
