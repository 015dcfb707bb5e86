//! Modelo de User

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Usuario - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub document: String,
    pub email: String,
    pub phone: Option<String>,
    pub username: String,
    pub password_hash: String,
    pub role_id: Uuid,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para registrar un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 255))]
    pub full_name: String,

    #[validate(length(min = 3, max = 50))]
    pub document: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    #[validate(length(min = 3, max = 100))]
    pub username: String,

    #[validate(length(min = 8, max = 72))]
    pub password: String,

    pub role_id: Uuid,
}

/// Request para actualizar un usuario (la contraseña se cambia aparte)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 255))]
    pub full_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    pub role_id: Option<Uuid>,
}

/// Response de usuario (sin hash de contraseña)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub document: String,
    pub email: String,
    pub phone: Option<String>,
    pub username: String,
    pub role_id: Uuid,
    pub status: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            document: user.document,
            email: user.email,
            phone: user.phone,
            username: user.username,
            role_id: user.role_id,
            status: user.status,
        }
    }
}
