use crate::models::contract::{Contract, ContractStatus};
use crate::models::service::Service;
use crate::utils::errors::AppError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct ContractRepository {
    pool: PgPool,
}

impl ContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Contract>, AppError> {
        let contract = sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contract)
    }

    pub async fn list(&self) -> Result<Vec<Contract>, AppError> {
        let contracts =
            sqlx::query_as::<_, Contract>("SELECT * FROM contracts ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(contracts)
    }

    pub async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Contract>, AppError> {
        let contracts = sqlx::query_as::<_, Contract>(
            "SELECT * FROM contracts WHERE client_id = $1 ORDER BY created_at DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(contracts)
    }

    /// Servicios asociados al contrato vía la tabla intermedia.
    pub async fn services_of(&self, contract_id: Uuid) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT s.* FROM services s
            INNER JOIN contract_services cs ON cs.service_id = s.id
            WHERE cs.contract_id = $1
            ORDER BY s.name ASC
            "#,
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    pub async fn find_by_id_in(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Contract>, AppError> {
        let contract = sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(contract)
    }

    pub async fn create_in(
        conn: &mut PgConnection,
        client_id: Uuid,
        start_date: NaiveDate,
        monthly_price: Decimal,
        terms: Option<String>,
    ) -> Result<Contract, AppError> {
        let contract = sqlx::query_as::<_, Contract>(
            r#"
            INSERT INTO contracts (id, client_id, start_date, monthly_price, status, terms)
            VALUES ($1, $2, $3, $4, 'active', $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(client_id)
        .bind(start_date)
        .bind(monthly_price)
        .bind(terms)
        .fetch_one(conn)
        .await?;

        Ok(contract)
    }

    pub async fn update_fields_in(
        conn: &mut PgConnection,
        id: Uuid,
        start_date: NaiveDate,
        monthly_price: Decimal,
        status: ContractStatus,
        terms: Option<String>,
    ) -> Result<Contract, AppError> {
        let contract = sqlx::query_as::<_, Contract>(
            r#"
            UPDATE contracts
            SET start_date = $2, monthly_price = $3, status = $4, terms = $5, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(start_date)
        .bind(monthly_price)
        .bind(status)
        .bind(terms)
        .fetch_one(conn)
        .await?;

        Ok(contract)
    }

    /// Borra la fila del contrato. Devuelve el error crudo de sqlx para que
    /// el servicio traduzca una violación de clave foránea a Conflict.
    pub async fn delete_in(conn: &mut PgConnection, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Reemplaza el conjunto completo de servicios asociados.
    /// Una lista vacía elimina todas las asociaciones.
    pub async fn set_services_in(
        conn: &mut PgConnection,
        contract_id: Uuid,
        service_ids: &[Uuid],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM contract_services WHERE contract_id = $1")
            .bind(contract_id)
            .execute(&mut *conn)
            .await?;

        for service_id in service_ids {
            sqlx::query("INSERT INTO contract_services (contract_id, service_id) VALUES ($1, $2)")
                .bind(contract_id)
                .bind(service_id)
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }

    pub async fn clear_services_in(
        conn: &mut PgConnection,
        contract_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM contract_services WHERE contract_id = $1")
            .bind(contract_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }
}
