use crate::models::client::{Client, ClientFilters};
use crate::models::EntityStatus;
use crate::utils::errors::AppError;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        document: String,
        email: String,
        phone: String,
    ) -> Result<Client, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, name, document, email, phone, specimen_count, status)
            VALUES ($1, $2, $3, $4, $5, 0, 'active')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(document)
        .bind(email)
        .bind(phone)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    /// Busca un cliente por documento, opcionalmente excluyendo un id
    /// (para chequeos de duplicado en actualizaciones).
    pub async fn find_by_document(
        &self,
        document: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE document = $1 AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(document)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn find_by_email(
        &self,
        email: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn list(&self, filters: &ClientFilters) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT * FROM clients
            WHERE ($1::entity_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filters.status)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: String,
        document: String,
        email: String,
        phone: String,
    ) -> Result<Client, sqlx::Error> {
        sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = $2, document = $3, email = $4, phone = $5, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(document)
        .bind(email)
        .bind(phone)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn set_status(&self, id: Uuid, status: EntityStatus) -> Result<Client, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    /// Borrado físico y permanente (estrategia `purge`). Devuelve el error
    /// crudo de sqlx para traducir violaciones de clave foránea a Conflict.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_by_id_in(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(client)
    }

    /// Ajusta el contador derivado de ejemplares del cliente dentro de la
    /// transacción del caller.
    ///
    /// La restricción CHECK (specimen_count >= 0) del esquema convierte
    /// cualquier decremento por debajo de cero en un error de base de datos,
    /// lo que aborta la transacción completa: la divergencia del contador
    /// nunca se tolera silenciosamente.
    pub async fn adjust_specimen_count_in(
        conn: &mut PgConnection,
        client_id: Uuid,
        delta: i32,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE clients SET specimen_count = specimen_count + $2, updated_at = now() WHERE id = $1",
        )
        .bind(client_id)
        .bind(delta)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Cliente {} no encontrado al ajustar contador de ejemplares",
                client_id
            )));
        }

        Ok(())
    }
}
