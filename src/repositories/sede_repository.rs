use crate::models::sede::Sede;
use crate::utils::errors::AppError;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct SedeRepository {
    pool: PgPool,
}

impl SedeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        address: String,
        city: String,
    ) -> Result<Sede, sqlx::Error> {
        sqlx::query_as::<_, Sede>(
            r#"
            INSERT INTO sedes (id, name, address, city)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(address)
        .bind(city)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Sede>, AppError> {
        let sede = sqlx::query_as::<_, Sede>("SELECT * FROM sedes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sede)
    }

    pub async fn list(&self) -> Result<Vec<Sede>, AppError> {
        let sedes = sqlx::query_as::<_, Sede>("SELECT * FROM sedes ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(sedes)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: String,
        address: String,
        city: String,
    ) -> Result<Sede, sqlx::Error> {
        sqlx::query_as::<_, Sede>(
            r#"
            UPDATE sedes
            SET name = $2, address = $3, city = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(address)
        .bind(city)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sedes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_by_id_in(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Sede>, AppError> {
        let sede = sqlx::query_as::<_, Sede>("SELECT * FROM sedes WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(sede)
    }
}
