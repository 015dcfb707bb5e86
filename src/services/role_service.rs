//! Servicio de roles y permisos
//!
//! Un rol y su conjunto de permisos se crean y actualizan en una sola
//! transacción: la fila del rol y las filas de la tabla intermedia nunca
//! quedan a medias. Los permisos se referencian por nombre y se resuelven a
//! ids contra la tabla permissions.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::role::{CreateRoleRequest, Permission, RoleResponse, UpdateRoleRequest};
use crate::repositories::role_repository::RoleRepository;
use crate::utils::errors::{conflict_error, map_constraint_violation, AppError, AppResult};

pub struct RoleService {
    pool: PgPool,
    roles: RoleRepository,
}

impl RoleService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            roles: RoleRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn list(&self, include_inactive: bool) -> AppResult<Vec<RoleResponse>> {
        let roles = self.roles.list(include_inactive).await?;

        let mut responses = Vec::with_capacity(roles.len());
        for role in roles {
            let permissions = self.roles.permission_names_of(role.id).await?;
            responses.push(RoleResponse::from_role(role, permissions));
        }

        Ok(responses)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<RoleResponse> {
        let role = self
            .roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rol no encontrado".to_string()))?;

        let permissions = self.roles.permission_names_of(id).await?;
        Ok(RoleResponse::from_role(role, permissions))
    }

    pub async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        self.roles.list_permissions().await
    }

    /// Crea el rol y asocia sus permisos en una transacción.
    pub async fn create(&self, request: CreateRoleRequest) -> AppResult<RoleResponse> {
        request.validate()?;

        let name = request.name.trim().to_string();

        if self.roles.find_by_name(&name, None).await?.is_some() {
            return Err(conflict_error("Rol", "nombre", &name));
        }

        let permission_ids = self.resolve_permission_ids(&request.permissions).await?;

        let mut tx = self.pool.begin().await?;

        let role = RoleRepository::create_in(&mut *tx, name.clone(), request.status.unwrap_or(true))
            .await
            .map_err(|e| {
                map_constraint_violation(
                    e,
                    &format!("El nombre de rol '{}' ya está en uso", name),
                )
            })?;

        if !permission_ids.is_empty() {
            RoleRepository::set_permissions_in(&mut *tx, role.id, &permission_ids).await?;
        }

        tx.commit().await?;
        info!("Rol {} creado con {} permisos", role.id, permission_ids.len());

        self.get_by_id(role.id).await
    }

    /// Actualiza nombre y/o conjunto de permisos del rol. La presencia de
    /// `permissions` (incluso vacío) reemplaza el conjunto completo.
    pub async fn update(&self, id: Uuid, request: UpdateRoleRequest) -> AppResult<RoleResponse> {
        request.validate()?;

        let role = self
            .roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rol no encontrado para actualizar".to_string()))?;

        let new_name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        if let Some(name) = &new_name {
            if *name != role.name && self.roles.find_by_name(name, Some(id)).await?.is_some() {
                return Err(conflict_error("Rol", "nombre", name));
            }
        }

        let permission_ids = match &request.permissions {
            Some(names) => Some(self.resolve_permission_ids(names).await?),
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        if let Some(name) = new_name {
            RoleRepository::update_name_in(&mut *tx, id, name.clone())
                .await
                .map_err(|e| {
                    map_constraint_violation(
                        e,
                        &format!("El nombre de rol '{}' ya está en uso", name),
                    )
                })?;
        }

        if let Some(ids) = permission_ids {
            RoleRepository::set_permissions_in(&mut *tx, id, &ids).await?;
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    pub async fn set_status(&self, id: Uuid, status: bool) -> AppResult<RoleResponse> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rol no encontrado".to_string()))?;

        let role = self.roles.set_status(id, status).await?;
        let permissions = self.roles.permission_names_of(id).await?;
        Ok(RoleResponse::from_role(role, permissions))
    }

    /// Elimina un rol sin usuarios asignados.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rol no encontrado para eliminar".to_string()))?;

        let users = self.roles.count_users_with_role(id).await?;
        if users > 0 {
            return Err(AppError::Conflict(format!(
                "No se puede eliminar el rol: {} usuario(s) lo tienen asignado",
                users
            )));
        }

        let mut tx = self.pool.begin().await?;
        RoleRepository::set_permissions_in(&mut *tx, id, &[]).await?;
        sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!("Rol {} eliminado", id);
        Ok(())
    }

    /// Resuelve nombres de permisos a ids; los nombres desconocidos se
    /// listan en el error.
    async fn resolve_permission_ids(&self, names: &[String]) -> AppResult<Vec<Uuid>> {
        let mut seen = std::collections::HashSet::new();
        let trimmed: Vec<String> = names
            .iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty() && seen.insert(n.clone()))
            .collect();

        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let found = self.roles.find_permissions_by_names(&trimmed).await?;

        if found.len() != trimmed.len() {
            let found_names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
            let missing: Vec<String> = trimmed
                .into_iter()
                .filter(|n| !found_names.contains(&n.as_str()))
                .collect();

            return Err(AppError::NotFound(format!(
                "Permisos no encontrados: {}",
                missing.join(", ")
            )));
        }

        Ok(found.into_iter().map(|p| p.id).collect())
    }
}
