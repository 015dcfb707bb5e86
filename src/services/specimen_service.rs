//! Servicio de ejemplares
//!
//! Concentra dos responsabilidades del núcleo transaccional:
//!
//! - **Mantenedor del contador derivado**: cada alta, baja o cambio de
//!   propietario de un ejemplar ajusta `clients.specimen_count` dentro de la
//!   MISMA transacción que la escritura. Un fallo del ajuste aborta la
//!   operación completa; la divergencia silenciosa no se tolera.
//! - **Motor de traslado**: cambia categoría y/o sede sin tocar propiedad ni
//!   contrato. Un traslado que no cambia nada es Conflict, no un éxito
//!   silencioso.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::specimen::{
    CreateSpecimenRequest, RelocateSpecimenRequest, Specimen, SpecimenFilters,
    UpdateSpecimenRequest,
};
use crate::repositories::client_repository::ClientRepository;
use crate::repositories::sede_repository::SedeRepository;
use crate::repositories::specimen_category_repository::SpecimenCategoryRepository;
use crate::repositories::specimen_repository::SpecimenRepository;
use crate::utils::errors::{map_constraint_violation, AppError, AppResult};
use crate::utils::validation::validate_not_empty;

pub struct SpecimenService {
    pool: PgPool,
    specimens: SpecimenRepository,
}

impl SpecimenService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            specimens: SpecimenRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn list(&self, filters: &SpecimenFilters) -> AppResult<Vec<Specimen>> {
        self.specimens.list(filters).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Specimen> {
        self.specimens
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ejemplar no encontrado".to_string()))
    }

    /// Registra un ejemplar e incrementa el contador del propietario en la
    /// misma transacción.
    pub async fn create(&self, request: CreateSpecimenRequest) -> AppResult<Specimen> {
        request.validate()?;

        validate_not_empty(&request.name).map_err(|_| {
            AppError::BadRequest("El nombre del ejemplar es requerido".to_string())
        })?;

        let mut tx = self.pool.begin().await?;

        ClientRepository::find_by_id_in(&mut *tx, request.owner_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Cliente con ID {} no encontrado",
                    request.owner_id
                ))
            })?;

        let category = SpecimenCategoryRepository::find_by_id_in(&mut *tx, request.category_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Categoría con ID {} no encontrada",
                    request.category_id
                ))
            })?;

        if !category.status.is_active() {
            return Err(AppError::Conflict(format!(
                "La categoría '{}' está inactiva y no admite ejemplares",
                category.name
            )));
        }

        if let Some(sede_id) = request.sede_id {
            SedeRepository::find_by_id_in(&mut *tx, sede_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Sede con ID {} no encontrada", sede_id))
                })?;
        }

        let specimen = SpecimenRepository::create_in(
            &mut *tx,
            request.name,
            request.breed,
            request.color,
            request.birth_date,
            request.owner_id,
            request.category_id,
            request.sede_id,
        )
        .await?;

        ClientRepository::adjust_specimen_count_in(&mut *tx, specimen.owner_id, 1).await?;

        tx.commit().await?;
        info!(
            "Ejemplar {} registrado para cliente {}",
            specimen.id, specimen.owner_id
        );

        Ok(specimen)
    }

    /// Actualiza los datos del ejemplar. Si cambia el propietario, decrementa
    /// el contador del anterior e incrementa el del nuevo dentro de la misma
    /// transacción que el cambio de propiedad.
    pub async fn update(&self, id: Uuid, request: UpdateSpecimenRequest) -> AppResult<Specimen> {
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        let current = SpecimenRepository::find_by_id_in(&mut *tx, id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Ejemplar no encontrado para actualizar".to_string())
            })?;

        let new_owner = request.owner_id.unwrap_or(current.owner_id);
        let owner_changed = new_owner != current.owner_id;

        if owner_changed {
            ClientRepository::find_by_id_in(&mut *tx, new_owner)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Cliente con ID {} no encontrado", new_owner))
                })?;
        }

        let specimen = SpecimenRepository::update_fields_in(
            &mut *tx,
            id,
            request.name.unwrap_or(current.name),
            request.breed.or(current.breed),
            request.color.or(current.color),
            request.birth_date.or(current.birth_date),
            new_owner,
        )
        .await?;

        if owner_changed {
            ClientRepository::adjust_specimen_count_in(&mut *tx, current.owner_id, -1).await?;
            ClientRepository::adjust_specimen_count_in(&mut *tx, new_owner, 1).await?;
        }

        tx.commit().await?;

        if owner_changed {
            info!(
                "Ejemplar {} transferido de cliente {} a cliente {}",
                id, current.owner_id, new_owner
            );
        }

        Ok(specimen)
    }

    /// Elimina el ejemplar y decrementa el contador del propietario que tenía
    /// antes del borrado, en la misma transacción.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        // El snapshot previo al borrado conserva el propietario a decrementar.
        let specimen = SpecimenRepository::find_by_id_in(&mut *tx, id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Ejemplar no encontrado para eliminar".to_string())
            })?;

        SpecimenRepository::delete_in(&mut *tx, id).await.map_err(|e| {
            map_constraint_violation(
                e,
                "No se puede eliminar el ejemplar: tiene registros de cuidado asociados",
            )
        })?;

        ClientRepository::adjust_specimen_count_in(&mut *tx, specimen.owner_id, -1).await?;

        tx.commit().await?;
        info!("Ejemplar {} eliminado", id);

        Ok(())
    }

    /// Traslada el ejemplar a otra categoría y/o sede.
    ///
    /// El traslado debe representar un cambio real: pedir la categoría o la
    /// sede actuales es Conflict. La propiedad y el vínculo contractual no se
    /// tocan por esta vía.
    pub async fn relocate(&self, id: Uuid, request: RelocateSpecimenRequest) -> AppResult<Specimen> {
        if request.category_id.is_none() && request.sede_id.is_none() {
            return Err(AppError::BadRequest(
                "Debe indicar una categoría y/o una sede de destino".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let current = SpecimenRepository::find_by_id_in(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ejemplar no encontrado para mover".to_string()))?;

        if let Some(category_id) = request.category_id {
            if category_id == current.category_id {
                return Err(AppError::Conflict(
                    "El ejemplar ya pertenece a esa categoría".to_string(),
                ));
            }

            let category = SpecimenCategoryRepository::find_by_id_in(&mut *tx, category_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Categoría con ID {} no encontrada", category_id))
                })?;

            if !category.status.is_active() {
                return Err(AppError::Conflict(format!(
                    "La categoría '{}' está inactiva y no admite ejemplares",
                    category.name
                )));
            }
        }

        if let Some(sede_id) = request.sede_id {
            if current.sede_id == Some(sede_id) {
                return Err(AppError::Conflict(
                    "El ejemplar ya se encuentra en esa sede".to_string(),
                ));
            }

            SedeRepository::find_by_id_in(&mut *tx, sede_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Sede con ID {} no encontrada", sede_id))
                })?;
        }

        let specimen = SpecimenRepository::relocate_in(
            &mut *tx,
            id,
            request.category_id.unwrap_or(current.category_id),
            request.sede_id.or(current.sede_id),
        )
        .await?;

        tx.commit().await?;
        info!("Ejemplar {} trasladado", id);

        Ok(specimen)
    }
}
