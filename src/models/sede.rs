//! Modelo de Sede

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Sede - mapea exactamente a la tabla sedes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sede {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
}

/// Request para crear una sede
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSedeRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 5, max = 255))]
    pub address: String,

    #[validate(length(min = 2, max = 100))]
    pub city: String,
}

/// Request para actualizar una sede
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSedeRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 5, max = 255))]
    pub address: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SedeResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
}

impl From<Sede> for SedeResponse {
    fn from(sede: Sede) -> Self {
        Self {
            id: sede.id,
            name: sede.name,
            address: sede.address,
            city: sede.city,
        }
    }
}
