//! Modelo de Payment
//!
//! Pagos mensuales de un contrato. A lo sumo un pago por (contrato, mes),
//! garantizado por restricción de unicidad en la base de datos; solo se
//! registran pagos contra contratos activos.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Método de pago. Mapea al tipo PostgreSQL `payment_method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Transfer,
}

/// Pago - mapea exactamente a la tabla payments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub payment_month: i32,
    pub payment_date: DateTime<Utc>,
}

/// Request para registrar un pago
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePaymentRequest {
    pub contract_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,

    #[validate(range(min = 1, max = 12))]
    pub payment_month: i32,
}

/// Request para actualizar un pago.
///
/// El contrato asociado es inmutable: no existe campo `contract_id` aquí y
/// el servicio rechaza cualquier intento de moverlo.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePaymentRequest {
    pub amount: Option<Decimal>,
    pub method: Option<PaymentMethod>,

    #[validate(range(min = 1, max = 12))]
    pub payment_month: Option<i32>,
}

/// Response de pago para la API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub payment_month: i32,
    pub payment_date: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            contract_id: payment.contract_id,
            amount: payment.amount,
            method: payment.method,
            payment_month: payment.payment_month,
            payment_date: payment.payment_date,
        }
    }
}
