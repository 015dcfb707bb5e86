use crate::models::service::Service;
use crate::models::EntityStatus;
use crate::utils::errors::AppError;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        price: Decimal,
        image_url: Option<String>,
    ) -> Result<Service, sqlx::Error> {
        sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (id, name, description, price, image_url, status)
            VALUES ($1, $2, $3, $4, $5, 'active')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(service)
    }

    pub async fn list(&self, status: Option<EntityStatus>) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT * FROM services
            WHERE ($1::entity_status IS NULL OR status = $1)
            ORDER BY name ASC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: String,
        description: Option<String>,
        price: Decimal,
        image_url: Option<String>,
    ) -> Result<Service, sqlx::Error> {
        sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
            SET name = $2, description = $3, price = $4, image_url = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn set_status(&self, id: Uuid, status: EntityStatus) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(
            "UPDATE services SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Devuelve los ids que SÍ existen entre los solicitados; el servicio
    /// usa la diferencia para reportar los faltantes en el error.
    pub async fn find_existing_ids_in(
        conn: &mut PgConnection,
        ids: &[Uuid],
    ) -> Result<Vec<Uuid>, AppError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM services WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(conn)
            .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
