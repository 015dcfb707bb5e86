//! Servicio de sedes

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::sede::{CreateSedeRequest, Sede, UpdateSedeRequest};
use crate::repositories::sede_repository::SedeRepository;
use crate::utils::errors::{map_constraint_violation, AppError, AppResult};

pub struct SedeService {
    sedes: SedeRepository,
}

impl SedeService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            sedes: SedeRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Sede>> {
        self.sedes.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Sede> {
        self.sedes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Sede no encontrada".to_string()))
    }

    pub async fn create(&self, request: CreateSedeRequest) -> AppResult<Sede> {
        request.validate()?;

        self.sedes
            .create(request.name.clone(), request.address, request.city)
            .await
            .map_err(|e| {
                map_constraint_violation(
                    e,
                    &format!("Ya existe una sede llamada '{}'", request.name),
                )
            })
    }

    pub async fn update(&self, id: Uuid, request: UpdateSedeRequest) -> AppResult<Sede> {
        request.validate()?;

        let current = self.get_by_id(id).await?;
        let name = request.name.unwrap_or(current.name);

        self.sedes
            .update(
                id,
                name.clone(),
                request.address.unwrap_or(current.address),
                request.city.unwrap_or(current.city),
            )
            .await
            .map_err(|e| {
                map_constraint_violation(e, &format!("Ya existe una sede llamada '{}'", name))
            })
    }

    /// Elimina la sede. Los ejemplares asignados disparan la clave foránea
    /// y se reportan como Conflict.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.get_by_id(id).await?;

        self.sedes.delete(id).await.map_err(|e| {
            map_constraint_violation(e, "No se puede eliminar la sede: tiene ejemplares asignados")
        })?;

        Ok(())
    }
}
