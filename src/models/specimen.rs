//! Modelo de Specimen (ejemplar)
//!
//! Cada ejemplar tiene exactamente un propietario y una categoría; la sede es
//! opcional. `contract_id` en NULL significa "disponible": un ejemplar nunca
//! puede estar vinculado a más de un contrato a la vez.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Ejemplar - mapea exactamente a la tabla specimens
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Specimen {
    pub id: Uuid,
    pub name: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub owner_id: Uuid,
    pub category_id: Uuid,
    pub sede_id: Option<Uuid>,
    pub contract_id: Option<Uuid>,
    pub identifier: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para registrar un ejemplar.
///
/// El `identifier` se genera en el servidor y `contract_id` solo lo escribe
/// el motor de contratos.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSpecimenRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(max = 100))]
    pub breed: Option<String>,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    pub birth_date: Option<NaiveDate>,
    pub owner_id: Uuid,
    pub category_id: Uuid,
    pub sede_id: Option<Uuid>,
}

/// Request para actualizar un ejemplar.
///
/// Cambiar `owner_id` dispara el ajuste de contadores de ambos clientes en la
/// misma transacción. La categoría y la sede se cambian por el endpoint de
/// traslado, y `contract_id` nunca se toca por esta vía.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSpecimenRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 100))]
    pub breed: Option<String>,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    pub birth_date: Option<NaiveDate>,
    pub owner_id: Option<Uuid>,
}

/// Request de traslado: nueva categoría y/o nueva sede.
#[derive(Debug, Deserialize)]
pub struct RelocateSpecimenRequest {
    pub category_id: Option<Uuid>,
    pub sede_id: Option<Uuid>,
}

/// Response de ejemplar para la API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecimenResponse {
    pub id: Uuid,
    pub name: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub owner_id: Uuid,
    pub category_id: Uuid,
    pub sede_id: Option<Uuid>,
    pub contract_id: Option<Uuid>,
    pub identifier: Uuid,
}

impl From<Specimen> for SpecimenResponse {
    fn from(specimen: Specimen) -> Self {
        Self {
            id: specimen.id,
            name: specimen.name,
            breed: specimen.breed,
            color: specimen.color,
            birth_date: specimen.birth_date,
            owner_id: specimen.owner_id,
            category_id: specimen.category_id,
            sede_id: specimen.sede_id,
            contract_id: specimen.contract_id,
            identifier: specimen.identifier,
        }
    }
}

/// Filtros para listado de ejemplares
#[derive(Debug, Clone, Deserialize)]
pub struct SpecimenFilters {
    pub owner_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub sede_id: Option<Uuid>,
    /// true = solo ejemplares sin contrato
    pub available: Option<bool>,
}
