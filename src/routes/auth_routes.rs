use axum::{extract::State, routing::post, Json, Router};

use crate::models::auth::{LoginRequest, LoginResponse};
use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de autenticación (sin middleware de token)
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let service = AuthService::new(
        state.pool.clone(),
        state.config.jwt_secret.clone(),
        state.config.jwt_expiration_hours,
    );

    let response = service.login(request).await?;
    Ok(Json(response))
}
