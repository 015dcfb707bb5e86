//! Servicio de registros de cuidado
//!
//! Medicinas, vacunaciones y alimentación de un ejemplar. Cada registro
//! pertenece a exactamente un ejemplar; el nombre es único por ejemplar y la
//! violación se traduce a Conflict.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::care::{
    CareStatus, CreateFeedingRequest, CreateMedicineRequest, CreateVaccinationRequest, Feeding,
    Medicine, Vaccination,
};
use crate::repositories::care_repository::CareRepository;
use crate::repositories::specimen_repository::SpecimenRepository;
use crate::utils::errors::{map_constraint_violation, AppError, AppResult};

pub struct CareService {
    care: CareRepository,
    specimens: SpecimenRepository,
}

impl CareService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            care: CareRepository::new(pool.clone()),
            specimens: SpecimenRepository::new(pool),
        }
    }

    async fn ensure_specimen_exists(&self, specimen_id: Uuid) -> AppResult<()> {
        self.specimens
            .find_by_id(specimen_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Ejemplar con ID {} no encontrado", specimen_id))
            })?;
        Ok(())
    }

    // --- Medicinas ---

    pub async fn create_medicine(&self, request: CreateMedicineRequest) -> AppResult<Medicine> {
        request.validate()?;
        self.ensure_specimen_exists(request.specimen_id).await?;

        self.care
            .create_medicine(request.specimen_id, request.name.clone(), request.dose)
            .await
            .map_err(|e| {
                map_constraint_violation(
                    e,
                    &format!(
                        "Ya existe un registro de medicina '{}' para ese ejemplar",
                        request.name
                    ),
                )
            })
    }

    pub async fn get_medicine(&self, id: Uuid) -> AppResult<Medicine> {
        self.care
            .find_medicine(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Medicina no encontrada".to_string()))
    }

    pub async fn list_medicines_by_specimen(&self, specimen_id: Uuid) -> AppResult<Vec<Medicine>> {
        self.ensure_specimen_exists(specimen_id).await?;
        self.care.list_medicines_by_specimen(specimen_id).await
    }

    pub async fn set_medicine_status(&self, id: Uuid, status: CareStatus) -> AppResult<Medicine> {
        self.get_medicine(id).await?;
        self.care.set_medicine_status(id, status).await
    }

    pub async fn delete_medicine(&self, id: Uuid) -> AppResult<()> {
        self.get_medicine(id).await?;
        self.care.delete_medicine(id).await?;
        Ok(())
    }

    // --- Vacunaciones ---

    pub async fn create_vaccination(
        &self,
        request: CreateVaccinationRequest,
    ) -> AppResult<Vaccination> {
        request.validate()?;
        self.ensure_specimen_exists(request.specimen_id).await?;

        self.care
            .create_vaccination(request.specimen_id, request.name.clone())
            .await
            .map_err(|e| {
                map_constraint_violation(
                    e,
                    &format!(
                        "Ya existe un registro de vacunación '{}' para ese ejemplar",
                        request.name
                    ),
                )
            })
    }

    pub async fn get_vaccination(&self, id: Uuid) -> AppResult<Vaccination> {
        self.care
            .find_vaccination(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vacunación no encontrada".to_string()))
    }

    pub async fn list_vaccinations_by_specimen(
        &self,
        specimen_id: Uuid,
    ) -> AppResult<Vec<Vaccination>> {
        self.ensure_specimen_exists(specimen_id).await?;
        self.care.list_vaccinations_by_specimen(specimen_id).await
    }

    pub async fn set_vaccination_status(
        &self,
        id: Uuid,
        status: CareStatus,
    ) -> AppResult<Vaccination> {
        self.get_vaccination(id).await?;
        self.care.set_vaccination_status(id, status).await
    }

    pub async fn delete_vaccination(&self, id: Uuid) -> AppResult<()> {
        self.get_vaccination(id).await?;
        self.care.delete_vaccination(id).await?;
        Ok(())
    }

    // --- Alimentación ---

    pub async fn create_feeding(&self, request: CreateFeedingRequest) -> AppResult<Feeding> {
        request.validate()?;
        self.ensure_specimen_exists(request.specimen_id).await?;

        self.care
            .create_feeding(request.specimen_id, request.name.clone(), request.quantity)
            .await
            .map_err(|e| {
                map_constraint_violation(
                    e,
                    &format!(
                        "Ya existe un registro de alimentación '{}' para ese ejemplar",
                        request.name
                    ),
                )
            })
    }

    pub async fn get_feeding(&self, id: Uuid) -> AppResult<Feeding> {
        self.care
            .find_feeding(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alimentación no encontrada".to_string()))
    }

    pub async fn list_feedings_by_specimen(&self, specimen_id: Uuid) -> AppResult<Vec<Feeding>> {
        self.ensure_specimen_exists(specimen_id).await?;
        self.care.list_feedings_by_specimen(specimen_id).await
    }

    pub async fn set_feeding_status(&self, id: Uuid, status: CareStatus) -> AppResult<Feeding> {
        self.get_feeding(id).await?;
        self.care.set_feeding_status(id, status).await
    }

    pub async fn delete_feeding(&self, id: Uuid) -> AppResult<()> {
        self.get_feeding(id).await?;
        self.care.delete_feeding(id).await?;
        Ok(())
    }
}
