use crate::models::specimen_category::SpecimenCategory;
use crate::models::EntityStatus;
use crate::utils::errors::AppError;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct SpecimenCategoryRepository {
    pool: PgPool,
}

impl SpecimenCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: String) -> Result<SpecimenCategory, sqlx::Error> {
        sqlx::query_as::<_, SpecimenCategory>(
            r#"
            INSERT INTO specimen_categories (id, name, status)
            VALUES ($1, $2, 'active')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SpecimenCategory>, AppError> {
        let category =
            sqlx::query_as::<_, SpecimenCategory>("SELECT * FROM specimen_categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(category)
    }

    pub async fn list(
        &self,
        status: Option<EntityStatus>,
    ) -> Result<Vec<SpecimenCategory>, AppError> {
        let categories = sqlx::query_as::<_, SpecimenCategory>(
            r#"
            SELECT * FROM specimen_categories
            WHERE ($1::entity_status IS NULL OR status = $1)
            ORDER BY name ASC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn update(&self, id: Uuid, name: String) -> Result<SpecimenCategory, sqlx::Error> {
        sqlx::query_as::<_, SpecimenCategory>(
            "UPDATE specimen_categories SET name = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: EntityStatus,
    ) -> Result<SpecimenCategory, AppError> {
        let category = sqlx::query_as::<_, SpecimenCategory>(
            "UPDATE specimen_categories SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM specimen_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_by_id_in(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<SpecimenCategory>, AppError> {
        let category =
            sqlx::query_as::<_, SpecimenCategory>("SELECT * FROM specimen_categories WHERE id = $1")
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(category)
    }
}
