use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::auth::authorize;
use crate::models::auth::Principal;
use crate::models::role::{CreateRoleRequest, Permission, RoleResponse, UpdateRoleRequest};
use crate::models::ApiResponse;
use crate::services::role_service::RoleService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_role_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_roles))
        .route("/", post(create_role))
        .route("/permissions", get(list_permissions))
        .route("/:id", get(get_role))
        .route("/:id", put(update_role))
        .route("/:id", delete(delete_role))
        .route("/:id/status", patch(set_role_status))
}

#[derive(Debug, Deserialize)]
struct RoleListFilter {
    #[serde(default)]
    include_inactive: bool,
}

#[derive(Debug, Deserialize)]
struct SetStatusRequest {
    status: bool,
}

async fn list_roles(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(filter): Query<RoleListFilter>,
) -> Result<Json<Vec<RoleResponse>>, AppError> {
    authorize(&state, &principal, "acceso_roles").await?;

    let service = RoleService::new(state.pool.clone());
    let roles = service.list(filter.include_inactive).await?;
    Ok(Json(roles))
}

async fn list_permissions(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<Permission>>, AppError> {
    authorize(&state, &principal, "acceso_roles").await?;

    let service = RoleService::new(state.pool.clone());
    let permissions = service.list_permissions().await?;
    Ok(Json(permissions))
}

async fn get_role(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoleResponse>, AppError> {
    authorize(&state, &principal, "acceso_roles").await?;

    let service = RoleService::new(state.pool.clone());
    let role = service.get_by_id(id).await?;
    Ok(Json(role))
}

async fn create_role(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateRoleRequest>,
) -> Result<Json<ApiResponse<RoleResponse>>, AppError> {
    authorize(&state, &principal, "crearRoles").await?;

    let service = RoleService::new(state.pool.clone());
    let role = service.create(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        role,
        "Rol creado exitosamente".to_string(),
    )))
}

async fn update_role(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<RoleResponse>>, AppError> {
    authorize(&state, &principal, "actualizarRoles").await?;

    let service = RoleService::new(state.pool.clone());
    let role = service.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        role,
        "Rol actualizado exitosamente".to_string(),
    )))
}

async fn set_role_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<ApiResponse<RoleResponse>>, AppError> {
    authorize(&state, &principal, "cambiarEstadoRoles").await?;

    let service = RoleService::new(state.pool.clone());
    let role = service.set_status(id, request.status).await?;
    Ok(Json(ApiResponse::success_with_message(
        role,
        "Estado del rol actualizado".to_string(),
    )))
}

async fn delete_role(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    authorize(&state, &principal, "eliminarRoles").await?;

    let service = RoleService::new(state.pool.clone());
    service.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Rol eliminado exitosamente"
    })))
}
