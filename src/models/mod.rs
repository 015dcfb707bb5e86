//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL, junto con sus DTOs de request/response.

pub mod auth;
pub mod care;
pub mod client;
pub mod contract;
pub mod payment;
pub mod role;
pub mod sede;
pub mod service;
pub mod specimen;
pub mod specimen_category;
pub mod user;

use serde::{Deserialize, Serialize};

/// Estado activo/inactivo compartido por clientes, categorías y servicios.
/// Mapea al tipo PostgreSQL `entity_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "entity_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    Active,
    Inactive,
}

impl EntityStatus {
    pub fn is_active(self) -> bool {
        matches!(self, EntityStatus::Active)
    }
}

/// Response genérica de la API
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
