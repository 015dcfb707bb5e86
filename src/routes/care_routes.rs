//! Rutas de registros de cuidado: medicinas, vacunaciones y alimentación

use axum::{
    extract::{Path, State},
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::middleware::auth::authorize;
use crate::models::auth::Principal;
use crate::models::care::{
    CreateFeedingRequest, CreateMedicineRequest, CreateVaccinationRequest, Feeding, Medicine,
    UpdateCareStatusRequest, Vaccination,
};
use crate::models::ApiResponse;
use crate::services::care_service::CareService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_care_router() -> Router<AppState> {
    Router::new()
        // Medicinas
        .route("/medicines", post(create_medicine))
        .route("/medicines/:id", get(get_medicine))
        .route("/medicines/:id", delete(delete_medicine))
        .route("/medicines/:id/status", patch(set_medicine_status))
        .route("/medicines/specimen/:specimen_id", get(list_medicines))
        // Vacunaciones
        .route("/vaccinations", post(create_vaccination))
        .route("/vaccinations/:id", get(get_vaccination))
        .route("/vaccinations/:id", delete(delete_vaccination))
        .route("/vaccinations/:id/status", patch(set_vaccination_status))
        .route(
            "/vaccinations/specimen/:specimen_id",
            get(list_vaccinations),
        )
        // Alimentación
        .route("/feedings", post(create_feeding))
        .route("/feedings/:id", get(get_feeding))
        .route("/feedings/:id", delete(delete_feeding))
        .route("/feedings/:id/status", patch(set_feeding_status))
        .route("/feedings/specimen/:specimen_id", get(list_feedings))
}

// --- Medicinas ---

async fn create_medicine(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateMedicineRequest>,
) -> Result<Json<ApiResponse<Medicine>>, AppError> {
    authorize(&state, &principal, "crearMedicina").await?;

    let service = CareService::new(state.pool.clone());
    let medicine = service.create_medicine(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        medicine,
        "Registro de medicina creado exitosamente".to_string(),
    )))
}

async fn get_medicine(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<Medicine>, AppError> {
    authorize(&state, &principal, "acceso_medicina").await?;

    let service = CareService::new(state.pool.clone());
    Ok(Json(service.get_medicine(id).await?))
}

async fn list_medicines(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(specimen_id): Path<Uuid>,
) -> Result<Json<Vec<Medicine>>, AppError> {
    authorize(&state, &principal, "acceso_medicina").await?;

    let service = CareService::new(state.pool.clone());
    Ok(Json(service.list_medicines_by_specimen(specimen_id).await?))
}

async fn set_medicine_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCareStatusRequest>,
) -> Result<Json<ApiResponse<Medicine>>, AppError> {
    authorize(&state, &principal, "actualizarMedicina").await?;

    let service = CareService::new(state.pool.clone());
    let medicine = service.set_medicine_status(id, request.status).await?;
    Ok(Json(ApiResponse::success_with_message(
        medicine,
        "Estado del registro actualizado".to_string(),
    )))
}

async fn delete_medicine(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    authorize(&state, &principal, "eliminarMedicina").await?;

    let service = CareService::new(state.pool.clone());
    service.delete_medicine(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Registro de medicina eliminado"
    })))
}

// --- Vacunaciones ---

async fn create_vaccination(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateVaccinationRequest>,
) -> Result<Json<ApiResponse<Vaccination>>, AppError> {
    authorize(&state, &principal, "crearVacunacion").await?;

    let service = CareService::new(state.pool.clone());
    let vaccination = service.create_vaccination(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        vaccination,
        "Registro de vacunación creado exitosamente".to_string(),
    )))
}

async fn get_vaccination(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vaccination>, AppError> {
    authorize(&state, &principal, "accesoVacunacion").await?;

    let service = CareService::new(state.pool.clone());
    Ok(Json(service.get_vaccination(id).await?))
}

async fn list_vaccinations(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(specimen_id): Path<Uuid>,
) -> Result<Json<Vec<Vaccination>>, AppError> {
    authorize(&state, &principal, "accesoVacunacion").await?;

    let service = CareService::new(state.pool.clone());
    Ok(Json(
        service.list_vaccinations_by_specimen(specimen_id).await?,
    ))
}

async fn set_vaccination_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCareStatusRequest>,
) -> Result<Json<ApiResponse<Vaccination>>, AppError> {
    authorize(&state, &principal, "actualizarVacunacion").await?;

    let service = CareService::new(state.pool.clone());
    let vaccination = service.set_vaccination_status(id, request.status).await?;
    Ok(Json(ApiResponse::success_with_message(
        vaccination,
        "Estado del registro actualizado".to_string(),
    )))
}

async fn delete_vaccination(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    authorize(&state, &principal, "eliminarVacunacion").await?;

    let service = CareService::new(state.pool.clone());
    service.delete_vaccination(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Registro de vacunación eliminado"
    })))
}

// --- Alimentación ---

async fn create_feeding(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateFeedingRequest>,
) -> Result<Json<ApiResponse<Feeding>>, AppError> {
    authorize(&state, &principal, "crearAlimentacion").await?;

    let service = CareService::new(state.pool.clone());
    let feeding = service.create_feeding(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        feeding,
        "Registro de alimentación creado exitosamente".to_string(),
    )))
}

async fn get_feeding(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<Feeding>, AppError> {
    authorize(&state, &principal, "accesoAlimentacion").await?;

    let service = CareService::new(state.pool.clone());
    Ok(Json(service.get_feeding(id).await?))
}

async fn list_feedings(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(specimen_id): Path<Uuid>,
) -> Result<Json<Vec<Feeding>>, AppError> {
    authorize(&state, &principal, "accesoAlimentacion").await?;

    let service = CareService::new(state.pool.clone());
    Ok(Json(service.list_feedings_by_specimen(specimen_id).await?))
}

async fn set_feeding_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCareStatusRequest>,
) -> Result<Json<ApiResponse<Feeding>>, AppError> {
    authorize(&state, &principal, "actualizarAlimentacion").await?;

    let service = CareService::new(state.pool.clone());
    let feeding = service.set_feeding_status(id, request.status).await?;
    Ok(Json(ApiResponse::success_with_message(
        feeding,
        "Estado del registro actualizado".to_string(),
    )))
}

async fn delete_feeding(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    authorize(&state, &principal, "eliminarAlimentacion").await?;

    let service = CareService::new(state.pool.clone());
    service.delete_feeding(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Registro de alimentación eliminado"
    })))
}
