//! Modelo de SpecimenCategory
//!
//! Un ejemplar solo puede asignarse a una categoría activa.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::EntityStatus;

/// Categoría de ejemplares - mapea exactamente a la tabla specimen_categories
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpecimenCategory {
    pub id: Uuid,
    pub name: String,
    pub status: EntityStatus,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub status: EntityStatus,
}

impl From<SpecimenCategory> for CategoryResponse {
    fn from(category: SpecimenCategory) -> Self {
        Self {
            id: category.id,
            name: category.name,
            status: category.status,
        }
    }
}
