use crate::models::specimen::{Specimen, SpecimenFilters};
use crate::utils::errors::AppError;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct SpecimenRepository {
    pool: PgPool,
}

impl SpecimenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Specimen>, AppError> {
        let specimen = sqlx::query_as::<_, Specimen>("SELECT * FROM specimens WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(specimen)
    }

    pub async fn list(&self, filters: &SpecimenFilters) -> Result<Vec<Specimen>, AppError> {
        let specimens = sqlx::query_as::<_, Specimen>(
            r#"
            SELECT * FROM specimens
            WHERE ($1::uuid IS NULL OR owner_id = $1)
              AND ($2::uuid IS NULL OR category_id = $2)
              AND ($3::uuid IS NULL OR sede_id = $3)
              AND ($4::boolean IS NULL OR ($4 = (contract_id IS NULL)))
            ORDER BY created_at DESC
            "#,
        )
        .bind(filters.owner_id)
        .bind(filters.category_id)
        .bind(filters.sede_id)
        .bind(filters.available)
        .fetch_all(&self.pool)
        .await?;

        Ok(specimens)
    }

    pub async fn list_by_contract(&self, contract_id: Uuid) -> Result<Vec<Specimen>, AppError> {
        let specimens = sqlx::query_as::<_, Specimen>(
            "SELECT * FROM specimens WHERE contract_id = $1 ORDER BY name ASC",
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(specimens)
    }

    pub async fn count_by_owner(&self, owner_id: Uuid) -> Result<i64, AppError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM specimens WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0)
    }

    pub async fn find_by_id_in(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Specimen>, AppError> {
        let specimen = sqlx::query_as::<_, Specimen>("SELECT * FROM specimens WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(specimen)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_in(
        conn: &mut PgConnection,
        name: String,
        breed: Option<String>,
        color: Option<String>,
        birth_date: Option<NaiveDate>,
        owner_id: Uuid,
        category_id: Uuid,
        sede_id: Option<Uuid>,
    ) -> Result<Specimen, AppError> {
        let specimen = sqlx::query_as::<_, Specimen>(
            r#"
            INSERT INTO specimens (id, name, breed, color, birth_date, owner_id, category_id, sede_id, contract_id, identifier)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NULL, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(breed)
        .bind(color)
        .bind(birth_date)
        .bind(owner_id)
        .bind(category_id)
        .bind(sede_id)
        .bind(Uuid::new_v4())
        .fetch_one(conn)
        .await?;

        Ok(specimen)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_fields_in(
        conn: &mut PgConnection,
        id: Uuid,
        name: String,
        breed: Option<String>,
        color: Option<String>,
        birth_date: Option<NaiveDate>,
        owner_id: Uuid,
    ) -> Result<Specimen, AppError> {
        let specimen = sqlx::query_as::<_, Specimen>(
            r#"
            UPDATE specimens
            SET name = $2, breed = $3, color = $4, birth_date = $5, owner_id = $6, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(breed)
        .bind(color)
        .bind(birth_date)
        .bind(owner_id)
        .fetch_one(conn)
        .await?;

        Ok(specimen)
    }

    pub async fn relocate_in(
        conn: &mut PgConnection,
        id: Uuid,
        category_id: Uuid,
        sede_id: Option<Uuid>,
    ) -> Result<Specimen, AppError> {
        let specimen = sqlx::query_as::<_, Specimen>(
            r#"
            UPDATE specimens
            SET category_id = $2, sede_id = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(category_id)
        .bind(sede_id)
        .fetch_one(conn)
        .await?;

        Ok(specimen)
    }

    /// Borra la fila del ejemplar. Devuelve el error crudo de sqlx para que
    /// el servicio traduzca una violación de clave foránea (registros de
    /// cuidado existentes) a Conflict.
    pub async fn delete_in(conn: &mut PgConnection, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM specimens WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Vincula el ejemplar al contrato SOLO si sigue disponible.
    ///
    /// El `WHERE contract_id IS NULL` es la garantía autoritativa de
    /// exclusividad bajo concurrencia: de dos escritores simultáneos, el
    /// segundo afecta cero filas y el servicio lo traduce a `Conflict`.
    pub async fn bind_contract_in(
        conn: &mut PgConnection,
        specimen_id: Uuid,
        contract_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE specimens
            SET contract_id = $2, updated_at = now()
            WHERE id = $1 AND contract_id IS NULL
            "#,
        )
        .bind(specimen_id)
        .bind(contract_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Libera todos los ejemplares vinculados a un contrato
    /// (contract_id → NULL) antes de borrarlo.
    pub async fn release_by_contract_in(
        conn: &mut PgConnection,
        contract_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE specimens SET contract_id = NULL, updated_at = now() WHERE contract_id = $1",
        )
        .bind(contract_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }
}
