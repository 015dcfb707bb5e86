//! Modelos de cuidado de ejemplares: medicinas, vacunaciones y alimentación
//!
//! Cada registro pertenece a exactamente un ejemplar y el nombre es único por
//! ejemplar (restricción de unicidad en la base de datos).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Estado de un registro de cuidado. Mapea al tipo PostgreSQL `care_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "care_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CareStatus {
    Scheduled,
    Administered,
    Cancelled,
}

/// Medicina - mapea exactamente a la tabla medicines
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Medicine {
    pub id: Uuid,
    pub specimen_id: Uuid,
    pub name: String,
    pub dose: String,
    pub status: CareStatus,
    pub created_at: DateTime<Utc>,
}

/// Vacunación - mapea exactamente a la tabla vaccinations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vaccination {
    pub id: Uuid,
    pub specimen_id: Uuid,
    pub name: String,
    pub status: CareStatus,
    pub created_at: DateTime<Utc>,
}

/// Alimentación - mapea exactamente a la tabla feedings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feeding {
    pub id: Uuid,
    pub specimen_id: Uuid,
    pub name: String,
    pub quantity: String,
    pub status: CareStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMedicineRequest {
    pub specimen_id: Uuid,

    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub dose: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVaccinationRequest {
    pub specimen_id: Uuid,

    #[validate(length(min = 2, max = 100))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFeedingRequest {
    pub specimen_id: Uuid,

    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub quantity: String,
}

/// Cambio de estado de un registro de cuidado
#[derive(Debug, Deserialize)]
pub struct UpdateCareStatusRequest {
    pub status: CareStatus,
}
