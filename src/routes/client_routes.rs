use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::middleware::auth::authorize;
use crate::models::auth::Principal;
use crate::models::client::{
    ClientFilters, ClientResponse, CreateClientRequest, UpdateClientRequest,
};
use crate::models::ApiResponse;
use crate::services::client_service::ClientService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_client_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients))
        .route("/", post(create_client))
        .route("/:id", get(get_client))
        .route("/:id", put(update_client))
        // Dos estrategias de borrado explícitas: desactivación (reversible)
        // y purga física (definitiva, solo sin ejemplares).
        .route("/:id", delete(deactivate_client))
        .route("/:id/purge", delete(purge_client))
        .route("/:id/reactivate", patch(reactivate_client))
}

async fn list_clients(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(filters): Query<ClientFilters>,
) -> Result<Json<Vec<ClientResponse>>, AppError> {
    authorize(&state, &principal, "acceso_clientes").await?;

    let service = ClientService::new(state.pool.clone());
    let clients = service.list(&filters).await?;
    Ok(Json(clients.into_iter().map(Into::into).collect()))
}

async fn get_client(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClientResponse>, AppError> {
    authorize(&state, &principal, "acceso_clientes").await?;

    let service = ClientService::new(state.pool.clone());
    let client = service.get_by_id(id).await?;
    Ok(Json(client.into()))
}

async fn create_client(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateClientRequest>,
) -> Result<Json<ApiResponse<ClientResponse>>, AppError> {
    authorize(&state, &principal, "crearClientes").await?;

    let service = ClientService::new(state.pool.clone());
    let client = service.create(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        client.into(),
        "Cliente registrado exitosamente".to_string(),
    )))
}

async fn update_client(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateClientRequest>,
) -> Result<Json<ApiResponse<ClientResponse>>, AppError> {
    authorize(&state, &principal, "actualizarClientes").await?;

    let service = ClientService::new(state.pool.clone());
    let client = service.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        client.into(),
        "Cliente actualizado exitosamente".to_string(),
    )))
}

async fn deactivate_client(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    authorize(&state, &principal, "cambiarEstadoClientes").await?;

    let service = ClientService::new(state.pool.clone());
    service.deactivate(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Cliente desactivado exitosamente"
    })))
}

async fn reactivate_client(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ClientResponse>>, AppError> {
    authorize(&state, &principal, "cambiarEstadoClientes").await?;

    let service = ClientService::new(state.pool.clone());
    let client = service.reactivate(id).await?;
    Ok(Json(ApiResponse::success_with_message(
        client.into(),
        "Cliente reactivado exitosamente".to_string(),
    )))
}

async fn purge_client(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    authorize(&state, &principal, "eliminarClientes").await?;

    let service = ClientService::new(state.pool.clone());
    service.purge(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Cliente eliminado permanentemente"
    })))
}
