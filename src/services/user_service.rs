//! Servicio de usuarios

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{CreateUserRequest, UpdateUserRequest, User, UserResponse};
use crate::repositories::role_repository::RoleRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{map_constraint_violation, AppError, AppResult};

pub struct UserService {
    users: UserRepository,
    roles: RoleRepository,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            roles: RoleRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.users.list().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<UserResponse> {
        let user = self.find_user(id).await?;
        Ok(user.into())
    }

    pub async fn create(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        request.validate()?;

        let role = self
            .roles
            .find_by_id(request.role_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Rol con ID {} no encontrado", request.role_id))
            })?;

        if !role.status {
            return Err(AppError::Conflict(format!(
                "El rol '{}' está inactivo y no puede asignarse",
                role.name
            )));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error al procesar la contraseña: {}", e)))?;

        let user = self
            .users
            .create(
                request.full_name,
                request.document,
                request.email,
                request.phone,
                request.username,
                password_hash,
                request.role_id,
            )
            .await
            .map_err(|e| {
                map_constraint_violation(
                    e,
                    "Ya existe un usuario con ese username, email o documento",
                )
            })?;

        info!("Usuario {} registrado", user.id);
        Ok(user.into())
    }

    pub async fn update(&self, id: Uuid, request: UpdateUserRequest) -> AppResult<UserResponse> {
        request.validate()?;

        let current = self.find_user(id).await?;

        let role_id = request.role_id.unwrap_or(current.role_id);
        if role_id != current.role_id {
            self.roles.find_by_id(role_id).await?.ok_or_else(|| {
                AppError::NotFound(format!("Rol con ID {} no encontrado", role_id))
            })?;
        }

        let user = self
            .users
            .update(
                id,
                request.full_name.unwrap_or(current.full_name),
                request.email.unwrap_or(current.email),
                request.phone.or(current.phone),
                role_id,
            )
            .await
            .map_err(|e| map_constraint_violation(e, "Ya existe un usuario con ese email"))?;

        Ok(user.into())
    }

    pub async fn set_status(&self, id: Uuid, status: bool) -> AppResult<UserResponse> {
        self.find_user(id).await?;
        let user = self.users.set_status(id, status).await?;
        Ok(user.into())
    }

    async fn find_user(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
    }
}
