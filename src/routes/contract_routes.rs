use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::middleware::auth::authorize;
use crate::models::auth::Principal;
use crate::models::contract::{
    ContractDetailResponse, ContractResponse, CreateContractRequest, UpdateContractRequest,
};
use crate::models::ApiResponse;
use crate::services::contract_service::ContractService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_contract_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contracts))
        .route("/", post(create_contract))
        .route("/:id", get(get_contract))
        .route("/:id", put(update_contract))
        .route("/:id", delete(delete_contract))
}

async fn list_contracts(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<ContractResponse>>, AppError> {
    authorize(&state, &principal, "acceso_contratos").await?;

    let service = ContractService::new(state.pool.clone());
    let contracts = service.list().await?;
    Ok(Json(contracts.into_iter().map(Into::into).collect()))
}

async fn get_contract(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContractDetailResponse>, AppError> {
    authorize(&state, &principal, "acceso_contratos").await?;

    let service = ContractService::new(state.pool.clone());
    let detail = service.get_detail(id).await?;
    Ok(Json(detail))
}

async fn create_contract(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateContractRequest>,
) -> Result<Json<ApiResponse<ContractDetailResponse>>, AppError> {
    authorize(&state, &principal, "crearContratos").await?;

    let service = ContractService::new(state.pool.clone());
    let detail = service.create(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        detail,
        "Contrato creado exitosamente".to_string(),
    )))
}

async fn update_contract(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateContractRequest>,
) -> Result<Json<ApiResponse<ContractDetailResponse>>, AppError> {
    authorize(&state, &principal, "actualizarContratos").await?;

    let service = ContractService::new(state.pool.clone());
    let detail = service.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        detail,
        "Contrato actualizado exitosamente".to_string(),
    )))
}

async fn delete_contract(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    authorize(&state, &principal, "eliminarContratos").await?;

    let service = ContractService::new(state.pool.clone());
    service.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Contrato eliminado exitosamente"
    })))
}
