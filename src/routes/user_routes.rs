use axum::{
    extract::{Path, State},
    routing::{get, patch, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::auth::authorize;
use crate::models::auth::Principal;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::models::ApiResponse;
use crate::services::user_service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/", post(create_user))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id/status", patch(set_user_status))
}

#[derive(Debug, Deserialize)]
struct SetStatusRequest {
    status: bool,
}

async fn list_users(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    authorize(&state, &principal, "acceso_usuarios").await?;

    let service = UserService::new(state.pool.clone());
    let users = service.list().await?;
    Ok(Json(users))
}

async fn get_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    authorize(&state, &principal, "acceso_usuarios").await?;

    let service = UserService::new(state.pool.clone());
    let user = service.get_by_id(id).await?;
    Ok(Json(user))
}

async fn create_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    authorize(&state, &principal, "crearUsuarios").await?;

    let service = UserService::new(state.pool.clone());
    let user = service.create(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        user,
        "Usuario registrado exitosamente".to_string(),
    )))
}

async fn update_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    authorize(&state, &principal, "editarUsuarios").await?;

    let service = UserService::new(state.pool.clone());
    let user = service.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        user,
        "Usuario actualizado exitosamente".to_string(),
    )))
}

async fn set_user_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    authorize(&state, &principal, "cambiarEstadoUsuarios").await?;

    let service = UserService::new(state.pool.clone());
    let user = service.set_status(id, request.status).await?;
    Ok(Json(ApiResponse::success_with_message(
        user,
        "Estado del usuario actualizado".to_string(),
    )))
}
