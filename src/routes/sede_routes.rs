use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::middleware::auth::authorize;
use crate::models::auth::Principal;
use crate::models::sede::{CreateSedeRequest, SedeResponse, UpdateSedeRequest};
use crate::models::ApiResponse;
use crate::services::sede_service::SedeService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_sede_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sedes))
        .route("/", post(create_sede))
        .route("/:id", get(get_sede))
        .route("/:id", put(update_sede))
        .route("/:id", delete(delete_sede))
}

async fn list_sedes(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<SedeResponse>>, AppError> {
    authorize(&state, &principal, "acceso_sedes").await?;

    let service = SedeService::new(state.pool.clone());
    let sedes = service.list().await?;
    Ok(Json(sedes.into_iter().map(Into::into).collect()))
}

async fn get_sede(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<SedeResponse>, AppError> {
    authorize(&state, &principal, "acceso_sedes").await?;

    let service = SedeService::new(state.pool.clone());
    let sede = service.get_by_id(id).await?;
    Ok(Json(sede.into()))
}

async fn create_sede(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateSedeRequest>,
) -> Result<Json<ApiResponse<SedeResponse>>, AppError> {
    authorize(&state, &principal, "crearSedes").await?;

    let service = SedeService::new(state.pool.clone());
    let sede = service.create(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        sede.into(),
        "Sede creada exitosamente".to_string(),
    )))
}

async fn update_sede(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSedeRequest>,
) -> Result<Json<ApiResponse<SedeResponse>>, AppError> {
    authorize(&state, &principal, "actualizarSedes").await?;

    let service = SedeService::new(state.pool.clone());
    let sede = service.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        sede.into(),
        "Sede actualizada exitosamente".to_string(),
    )))
}

async fn delete_sede(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    authorize(&state, &principal, "eliminarSedes").await?;

    let service = SedeService::new(state.pool.clone());
    service.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Sede eliminada exitosamente"
    })))
}
