use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::auth::authorize;
use crate::models::auth::Principal;
use crate::models::specimen_category::{
    CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::models::{ApiResponse, EntityStatus};
use crate::services::specimen_category_service::SpecimenCategoryService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_category_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/", post(create_category))
        .route("/:id", get(get_category))
        .route("/:id", put(update_category))
        .route("/:id", delete(delete_category))
        .route("/:id/status", patch(set_category_status))
}

#[derive(Debug, Deserialize)]
struct StatusFilter {
    status: Option<EntityStatus>,
}

#[derive(Debug, Deserialize)]
struct SetStatusRequest {
    status: EntityStatus,
}

async fn list_categories(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    authorize(&state, &principal, "acceso_categorias").await?;

    let service = SpecimenCategoryService::new(state.pool.clone());
    let categories = service.list(filter.status).await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

async fn get_category(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<CategoryResponse>, AppError> {
    authorize(&state, &principal, "acceso_categorias").await?;

    let service = SpecimenCategoryService::new(state.pool.clone());
    let category = service.get_by_id(id).await?;
    Ok(Json(category.into()))
}

async fn create_category(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryResponse>>, AppError> {
    authorize(&state, &principal, "crearCategorias").await?;

    let service = SpecimenCategoryService::new(state.pool.clone());
    let category = service.create(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        category.into(),
        "Categoría creada exitosamente".to_string(),
    )))
}

async fn update_category(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryResponse>>, AppError> {
    authorize(&state, &principal, "actualizarCategorias").await?;

    let service = SpecimenCategoryService::new(state.pool.clone());
    let category = service.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        category.into(),
        "Categoría actualizada exitosamente".to_string(),
    )))
}

async fn set_category_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<ApiResponse<CategoryResponse>>, AppError> {
    authorize(&state, &principal, "cambiarEstadoCategorias").await?;

    let service = SpecimenCategoryService::new(state.pool.clone());
    let category = service.set_status(id, request.status).await?;
    Ok(Json(ApiResponse::success_with_message(
        category.into(),
        "Estado de la categoría actualizado".to_string(),
    )))
}

async fn delete_category(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    authorize(&state, &principal, "eliminarCategorias").await?;

    let service = SpecimenCategoryService::new(state.pool.clone());
    service.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Categoría eliminada exitosamente"
    })))
}
