//! Modelo de Service
//!
//! Servicios facturables que se asocian a contratos (relación muchos a muchos
//! vía la tabla contract_services).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::EntityStatus;

/// Servicio - mapea exactamente a la tabla services
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub status: EntityStatus,
}

/// Request para crear un servicio
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub price: Decimal,

    #[validate(length(max = 255))]
    pub image_url: Option<String>,
}

/// Request para actualizar un servicio
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServiceRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub price: Option<Decimal>,

    #[validate(length(max = 255))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub status: EntityStatus,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            name: service.name,
            description: service.description,
            price: service.price,
            image_url: service.image_url,
            status: service.status,
        }
    }
}
