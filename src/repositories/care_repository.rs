//! Repositorio de registros de cuidado (medicinas, vacunaciones, alimentación)
//!
//! Las tres tablas comparten la misma forma de acceso; la unicidad de
//! (specimen_id, name) la garantiza el esquema y los servicios la traducen
//! a Conflict.

use crate::models::care::{CareStatus, Feeding, Medicine, Vaccination};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct CareRepository {
    pool: PgPool,
}

impl CareRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Medicinas ---

    pub async fn create_medicine(
        &self,
        specimen_id: Uuid,
        name: String,
        dose: String,
    ) -> Result<Medicine, sqlx::Error> {
        sqlx::query_as::<_, Medicine>(
            r#"
            INSERT INTO medicines (id, specimen_id, name, dose, status)
            VALUES ($1, $2, $3, $4, 'scheduled')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(specimen_id)
        .bind(name)
        .bind(dose)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_medicine(&self, id: Uuid) -> Result<Option<Medicine>, AppError> {
        let medicine = sqlx::query_as::<_, Medicine>("SELECT * FROM medicines WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(medicine)
    }

    pub async fn list_medicines_by_specimen(
        &self,
        specimen_id: Uuid,
    ) -> Result<Vec<Medicine>, AppError> {
        let medicines = sqlx::query_as::<_, Medicine>(
            "SELECT * FROM medicines WHERE specimen_id = $1 ORDER BY created_at DESC",
        )
        .bind(specimen_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(medicines)
    }

    pub async fn set_medicine_status(
        &self,
        id: Uuid,
        status: CareStatus,
    ) -> Result<Medicine, AppError> {
        let medicine = sqlx::query_as::<_, Medicine>(
            "UPDATE medicines SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(medicine)
    }

    pub async fn delete_medicine(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM medicines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // --- Vacunaciones ---

    pub async fn create_vaccination(
        &self,
        specimen_id: Uuid,
        name: String,
    ) -> Result<Vaccination, sqlx::Error> {
        sqlx::query_as::<_, Vaccination>(
            r#"
            INSERT INTO vaccinations (id, specimen_id, name, status)
            VALUES ($1, $2, $3, 'scheduled')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(specimen_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_vaccination(&self, id: Uuid) -> Result<Option<Vaccination>, AppError> {
        let vaccination =
            sqlx::query_as::<_, Vaccination>("SELECT * FROM vaccinations WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(vaccination)
    }

    pub async fn list_vaccinations_by_specimen(
        &self,
        specimen_id: Uuid,
    ) -> Result<Vec<Vaccination>, AppError> {
        let vaccinations = sqlx::query_as::<_, Vaccination>(
            "SELECT * FROM vaccinations WHERE specimen_id = $1 ORDER BY created_at DESC",
        )
        .bind(specimen_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vaccinations)
    }

    pub async fn set_vaccination_status(
        &self,
        id: Uuid,
        status: CareStatus,
    ) -> Result<Vaccination, AppError> {
        let vaccination = sqlx::query_as::<_, Vaccination>(
            "UPDATE vaccinations SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(vaccination)
    }

    pub async fn delete_vaccination(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM vaccinations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // --- Alimentación ---

    pub async fn create_feeding(
        &self,
        specimen_id: Uuid,
        name: String,
        quantity: String,
    ) -> Result<Feeding, sqlx::Error> {
        sqlx::query_as::<_, Feeding>(
            r#"
            INSERT INTO feedings (id, specimen_id, name, quantity, status)
            VALUES ($1, $2, $3, $4, 'scheduled')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(specimen_id)
        .bind(name)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_feeding(&self, id: Uuid) -> Result<Option<Feeding>, AppError> {
        let feeding = sqlx::query_as::<_, Feeding>("SELECT * FROM feedings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(feeding)
    }

    pub async fn list_feedings_by_specimen(
        &self,
        specimen_id: Uuid,
    ) -> Result<Vec<Feeding>, AppError> {
        let feedings = sqlx::query_as::<_, Feeding>(
            "SELECT * FROM feedings WHERE specimen_id = $1 ORDER BY created_at DESC",
        )
        .bind(specimen_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(feedings)
    }

    pub async fn set_feeding_status(
        &self,
        id: Uuid,
        status: CareStatus,
    ) -> Result<Feeding, AppError> {
        let feeding = sqlx::query_as::<_, Feeding>(
            "UPDATE feedings SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(feeding)
    }

    pub async fn delete_feeding(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM feedings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
