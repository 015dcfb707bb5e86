//! Modelos de Role y Permission
//!
//! Un rol agrupa un conjunto de permisos (strings de capacidad como
//! `acceso_contratos` o `crearContratos`). Los usuarios pertenecen a
//! exactamente un rol; el conjunto de permisos se resuelve en cada
//! verificación, nunca se cachea.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Rol - mapea exactamente a la tabla roles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Permiso - mapea exactamente a la tabla permissions
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    pub id: Uuid,
    pub name: String,
}

/// Request para crear un rol con su conjunto de permisos (por nombre)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    /// Nombres de permisos a asociar.
    #[serde(default)]
    pub permissions: Vec<String>,

    pub status: Option<bool>,
}

/// Request para actualizar un rol.
///
/// La presencia de `permissions` (incluso vacío) reemplaza el conjunto
/// completo; su ausencia lo deja intacto.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    pub permissions: Option<Vec<String>>,
}

/// Response de rol con los nombres de sus permisos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    pub id: Uuid,
    pub name: String,
    pub status: bool,
    pub permissions: Vec<String>,
}

impl RoleResponse {
    pub fn from_role(role: Role, permissions: Vec<String>) -> Self {
        Self {
            id: role.id,
            name: role.name,
            status: role.status,
            permissions,
        }
    }
}
