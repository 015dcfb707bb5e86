use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::auth::authorize;
use crate::models::auth::Principal;
use crate::models::service::{CreateServiceRequest, ServiceResponse, UpdateServiceRequest};
use crate::models::{ApiResponse, EntityStatus};
use crate::services::service_service::ServiceService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_service_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services))
        .route("/", post(create_service))
        .route("/:id", get(get_service))
        .route("/:id", put(update_service))
        .route("/:id", delete(delete_service))
        .route("/:id/status", patch(set_service_status))
}

#[derive(Debug, Deserialize)]
struct StatusFilter {
    status: Option<EntityStatus>,
}

#[derive(Debug, Deserialize)]
struct SetStatusRequest {
    status: EntityStatus,
}

async fn list_services(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    authorize(&state, &principal, "acceso_servicios").await?;

    let service = ServiceService::new(state.pool.clone());
    let services = service.list(filter.status).await?;
    Ok(Json(services.into_iter().map(Into::into).collect()))
}

async fn get_service(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse>, AppError> {
    authorize(&state, &principal, "acceso_servicios").await?;

    let service = ServiceService::new(state.pool.clone());
    let found = service.get_by_id(id).await?;
    Ok(Json(found.into()))
}

async fn create_service(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<Json<ApiResponse<ServiceResponse>>, AppError> {
    authorize(&state, &principal, "crearServicios").await?;

    let service = ServiceService::new(state.pool.clone());
    let created = service.create(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        created.into(),
        "Servicio creado exitosamente".to_string(),
    )))
}

async fn update_service(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateServiceRequest>,
) -> Result<Json<ApiResponse<ServiceResponse>>, AppError> {
    authorize(&state, &principal, "actualizarServicios").await?;

    let service = ServiceService::new(state.pool.clone());
    let updated = service.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        updated.into(),
        "Servicio actualizado exitosamente".to_string(),
    )))
}

async fn set_service_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<ApiResponse<ServiceResponse>>, AppError> {
    authorize(&state, &principal, "cambiarEstadoServicios").await?;

    let service = ServiceService::new(state.pool.clone());
    let updated = service.set_status(id, request.status).await?;
    Ok(Json(ApiResponse::success_with_message(
        updated.into(),
        "Estado del servicio actualizado".to_string(),
    )))
}

async fn delete_service(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    authorize(&state, &principal, "eliminarServicios").await?;

    let service = ServiceService::new(state.pool.clone());
    service.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Servicio eliminado exitosamente"
    })))
}
