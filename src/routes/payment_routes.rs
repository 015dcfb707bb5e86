use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::middleware::auth::authorize;
use crate::models::auth::Principal;
use crate::models::payment::{CreatePaymentRequest, PaymentResponse, UpdatePaymentRequest};
use crate::models::ApiResponse;
use crate::services::payment_service::PaymentService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_payment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments))
        .route("/", post(create_payment))
        .route("/:id", get(get_payment))
        .route("/:id", put(update_payment))
        .route("/contract/:contract_id", get(list_by_contract))
}

async fn list_payments(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<PaymentResponse>>, AppError> {
    authorize(&state, &principal, "acceso_pagos").await?;

    let service = PaymentService::new(state.pool.clone());
    let payments = service.list().await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

async fn get_payment(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, AppError> {
    authorize(&state, &principal, "acceso_pagos").await?;

    let service = PaymentService::new(state.pool.clone());
    let payment = service.get_by_id(id).await?;
    Ok(Json(payment.into()))
}

async fn list_by_contract(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(contract_id): Path<Uuid>,
) -> Result<Json<Vec<PaymentResponse>>, AppError> {
    authorize(&state, &principal, "acceso_pagos").await?;

    let service = PaymentService::new(state.pool.clone());
    let payments = service.list_by_contract(contract_id).await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

async fn create_payment(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<ApiResponse<PaymentResponse>>, AppError> {
    authorize(&state, &principal, "crearPagos").await?;

    let service = PaymentService::new(state.pool.clone());
    let payment = service.create(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        payment.into(),
        "Pago registrado exitosamente".to_string(),
    )))
}

async fn update_payment(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<Json<ApiResponse<PaymentResponse>>, AppError> {
    authorize(&state, &principal, "actualizarPagos").await?;

    let service = PaymentService::new(state.pool.clone());
    let payment = service.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        payment.into(),
        "Pago actualizado exitosamente".to_string(),
    )))
}
