//! Modelo de Client
//!
//! Clientes del criadero. El campo `specimen_count` es un contador derivado:
//! siempre debe coincidir con el número de ejemplares cuyo `owner_id` apunta
//! al cliente, y solo lo modifica el mantenedor de contadores dentro de la
//! transacción que escribe el ejemplar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::EntityStatus;

/// Cliente - mapea exactamente a la tabla clients
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub email: String,
    pub phone: String,
    pub specimen_count: i32,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para registrar un nuevo cliente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: String,

    #[validate(length(min = 3, max = 50))]
    pub document: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 7, max = 30))]
    pub phone: String,
}

/// Request para actualizar un cliente existente.
///
/// El estado no se actualiza por esta vía: solo a través de los endpoints
/// de activación/desactivación, y `specimen_count` nunca lo escribe el caller.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 3, max = 50))]
    pub document: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 7, max = 30))]
    pub phone: Option<String>,
}

/// Response de cliente para la API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientResponse {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub email: String,
    pub phone: String,
    pub specimen_count: i32,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            document: client.document,
            email: client.email,
            phone: client.phone,
            specimen_count: client.specimen_count,
            status: client.status,
            created_at: client.created_at,
        }
    }
}

/// Filtros para listado de clientes
#[derive(Debug, Clone, Deserialize)]
pub struct ClientFilters {
    pub status: Option<EntityStatus>,
}
