use crate::models::payment::{Payment, PaymentMethod};
use crate::utils::errors::AppError;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta un pago. La unicidad (contract_id, payment_month) la garantiza
    /// la restricción del esquema; el servicio traduce la violación a Conflict.
    pub async fn create(
        &self,
        contract_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
        payment_month: i32,
    ) -> Result<Payment, sqlx::Error> {
        sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (id, contract_id, amount, method, payment_month)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(contract_id)
        .bind(amount)
        .bind(method)
        .bind(payment_month)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payment)
    }

    pub async fn list(&self) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments ORDER BY payment_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn list_by_contract(&self, contract_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE contract_id = $1 ORDER BY payment_month ASC",
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn update(
        &self,
        id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
        payment_month: i32,
    ) -> Result<Payment, sqlx::Error> {
        sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET amount = $2, method = $3, payment_month = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(method)
        .bind(payment_month)
        .fetch_one(&self.pool)
        .await
    }
}
