//! Modelos de autenticación
//!
//! Claims del JWT y DTOs de login. La generación y verificación de tokens
//! vive en `services::auth_service`; el middleware del gate solo consume el
//! principal resultante.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::user::UserResponse;

/// Claims del token JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// ID del usuario autenticado
    pub sub: Uuid,
    /// ID del rol del usuario
    pub role_id: Uuid,
    pub username: String,
    /// Expiración (timestamp UNIX)
    pub exp: i64,
    /// Emisión (timestamp UNIX)
    pub iat: i64,
}

/// Principal autenticado, inyectado en las extensiones del request
/// por el middleware de autenticación.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub username: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 100))]
    pub username: String,

    #[validate(length(min = 1, max = 72))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}
