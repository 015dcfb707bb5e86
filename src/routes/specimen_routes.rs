use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::middleware::auth::authorize;
use crate::models::auth::Principal;
use crate::models::specimen::{
    CreateSpecimenRequest, RelocateSpecimenRequest, SpecimenFilters, SpecimenResponse,
    UpdateSpecimenRequest,
};
use crate::models::ApiResponse;
use crate::services::specimen_service::SpecimenService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_specimen_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_specimens))
        .route("/", post(create_specimen))
        .route("/:id", get(get_specimen))
        .route("/:id", put(update_specimen))
        .route("/:id", delete(delete_specimen))
        .route("/:id/relocate", patch(relocate_specimen))
}

async fn list_specimens(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(filters): Query<SpecimenFilters>,
) -> Result<Json<Vec<SpecimenResponse>>, AppError> {
    authorize(&state, &principal, "acceso_ejemplares").await?;

    let service = SpecimenService::new(state.pool.clone());
    let specimens = service.list(&filters).await?;
    Ok(Json(specimens.into_iter().map(Into::into).collect()))
}

async fn get_specimen(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<SpecimenResponse>, AppError> {
    authorize(&state, &principal, "acceso_ejemplares").await?;

    let service = SpecimenService::new(state.pool.clone());
    let specimen = service.get_by_id(id).await?;
    Ok(Json(specimen.into()))
}

async fn create_specimen(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateSpecimenRequest>,
) -> Result<Json<ApiResponse<SpecimenResponse>>, AppError> {
    authorize(&state, &principal, "crearEjemplares").await?;

    let service = SpecimenService::new(state.pool.clone());
    let specimen = service.create(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        specimen.into(),
        "Ejemplar registrado exitosamente".to_string(),
    )))
}

async fn update_specimen(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSpecimenRequest>,
) -> Result<Json<ApiResponse<SpecimenResponse>>, AppError> {
    authorize(&state, &principal, "actualizarEjemplares").await?;

    let service = SpecimenService::new(state.pool.clone());
    let specimen = service.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        specimen.into(),
        "Ejemplar actualizado exitosamente".to_string(),
    )))
}

async fn relocate_specimen(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<RelocateSpecimenRequest>,
) -> Result<Json<ApiResponse<SpecimenResponse>>, AppError> {
    authorize(&state, &principal, "actualizarEjemplares").await?;

    let service = SpecimenService::new(state.pool.clone());
    let specimen = service.relocate(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        specimen.into(),
        "Ejemplar trasladado exitosamente".to_string(),
    )))
}

async fn delete_specimen(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    authorize(&state, &principal, "eliminarEjemplares").await?;

    let service = SpecimenService::new(state.pool.clone());
    service.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Ejemplar eliminado exitosamente"
    })))
}
