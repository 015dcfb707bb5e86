use axum::{extract::State, routing::get, Extension, Json, Router};

use crate::middleware::auth::authorize;
use crate::models::auth::Principal;
use crate::services::dashboard_service::{DashboardService, DashboardSummary};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(get_summary))
}

async fn get_summary(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<DashboardSummary>, AppError> {
    authorize(&state, &principal, "acceso_dashboard").await?;

    let service = DashboardService::new(state.pool.clone());
    let summary = service.summary().await?;
    Ok(Json(summary))
}
