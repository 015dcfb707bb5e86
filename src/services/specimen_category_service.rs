//! Servicio de categorías de ejemplares

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::specimen_category::{
    CreateCategoryRequest, SpecimenCategory, UpdateCategoryRequest,
};
use crate::models::EntityStatus;
use crate::repositories::specimen_category_repository::SpecimenCategoryRepository;
use crate::utils::errors::{map_constraint_violation, AppError, AppResult};

pub struct SpecimenCategoryService {
    categories: SpecimenCategoryRepository,
}

impl SpecimenCategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            categories: SpecimenCategoryRepository::new(pool),
        }
    }

    pub async fn list(&self, status: Option<EntityStatus>) -> AppResult<Vec<SpecimenCategory>> {
        self.categories.list(status).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<SpecimenCategory> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Categoría no encontrada".to_string()))
    }

    pub async fn create(&self, request: CreateCategoryRequest) -> AppResult<SpecimenCategory> {
        request.validate()?;

        self.categories
            .create(request.name.clone())
            .await
            .map_err(|e| {
                map_constraint_violation(
                    e,
                    &format!("Ya existe una categoría llamada '{}'", request.name),
                )
            })
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateCategoryRequest,
    ) -> AppResult<SpecimenCategory> {
        request.validate()?;

        let current = self.get_by_id(id).await?;
        let name = request.name.unwrap_or(current.name);

        self.categories.update(id, name.clone()).await.map_err(|e| {
            map_constraint_violation(e, &format!("Ya existe una categoría llamada '{}'", name))
        })
    }

    /// Desactivar una categoría impide nuevas asignaciones de ejemplares,
    /// pero no toca los ejemplares que ya pertenecen a ella.
    pub async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<SpecimenCategory> {
        self.get_by_id(id).await?;
        self.categories.set_status(id, status).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.get_by_id(id).await?;

        self.categories.delete(id).await.map_err(|e| {
            map_constraint_violation(
                e,
                "No se puede eliminar la categoría: tiene ejemplares asignados",
            )
        })?;

        Ok(())
    }
}
