//! Servicio de pagos
//!
//! Registra pagos mensuales contra contratos activos. La unicidad de
//! (contrato, mes) la garantiza la restricción del esquema: el chequeo
//! aplicativo previo solo produce un mensaje amistoso, y la violación de la
//! restricción bajo concurrencia se traduce a Conflict. El contrato de un
//! pago es inmutable.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::contract::ContractStatus;
use crate::models::payment::{CreatePaymentRequest, Payment, UpdatePaymentRequest};
use crate::repositories::contract_repository::ContractRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::utils::errors::{map_constraint_violation, AppError, AppResult};
use crate::utils::validation::validate_payment_month;

pub struct PaymentService {
    payments: PaymentRepository,
    contracts: ContractRepository,
}

impl PaymentService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            payments: PaymentRepository::new(pool.clone()),
            contracts: ContractRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Payment>> {
        self.payments.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Payment> {
        self.payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pago no encontrado".to_string()))
    }

    pub async fn list_by_contract(&self, contract_id: Uuid) -> AppResult<Vec<Payment>> {
        self.contracts
            .find_by_id(contract_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Contrato con ID {} no encontrado", contract_id))
            })?;

        self.payments.list_by_contract(contract_id).await
    }

    /// Registra un pago. Solo se admiten pagos contra contratos en estado
    /// `active`; nada se escribe si el contrato está finalizado o cancelado.
    pub async fn create(&self, request: CreatePaymentRequest) -> AppResult<Payment> {
        request.validate()?;

        // Defensa en profundidad: el DTO ya validó el rango, pero el motor
        // no confía ciegamente en la capa de entrada.
        validate_payment_month(request.payment_month).map_err(|_| {
            AppError::BadRequest("El mes de pago debe estar entre 1 y 12".to_string())
        })?;

        if request.amount <= Decimal::ZERO {
            return Err(AppError::BadRequest(
                "El valor del pago debe ser mayor que cero".to_string(),
            ));
        }

        let contract = self
            .contracts
            .find_by_id(request.contract_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "El contrato con ID {} no existe",
                    request.contract_id
                ))
            })?;

        if contract.status != ContractStatus::Active {
            return Err(AppError::Conflict(format!(
                "Solo se pueden registrar pagos para contratos activos; el contrato {} está {:?}",
                contract.id, contract.status
            )));
        }

        let payment = self
            .payments
            .create(
                request.contract_id,
                request.amount,
                request.method,
                request.payment_month,
            )
            .await
            .map_err(|e| {
                map_constraint_violation(
                    e,
                    &format!(
                        "Ya existe un pago registrado para el contrato {} correspondiente al mes {}",
                        request.contract_id, request.payment_month
                    ),
                )
            })?;

        info!(
            "Pago {} registrado para contrato {} (mes {})",
            payment.id, payment.contract_id, payment.payment_month
        );
        Ok(payment)
    }

    /// Actualiza valor, método o mes de un pago existente. El contrato
    /// asociado no puede cambiarse; mover el pago a un mes ya cubierto
    /// dispara la restricción de unicidad y se reporta como Conflict.
    pub async fn update(&self, id: Uuid, request: UpdatePaymentRequest) -> AppResult<Payment> {
        request.validate()?;

        if let Some(month) = request.payment_month {
            validate_payment_month(month).map_err(|_| {
                AppError::BadRequest("El mes de pago debe estar entre 1 y 12".to_string())
            })?;
        }

        let current = self.get_by_id(id).await?;

        if let Some(amount) = request.amount {
            if amount <= Decimal::ZERO {
                return Err(AppError::BadRequest(
                    "El valor del pago debe ser mayor que cero".to_string(),
                ));
            }
        }

        let payment = self
            .payments
            .update(
                id,
                request.amount.unwrap_or(current.amount),
                request.method.unwrap_or(current.method),
                request.payment_month.unwrap_or(current.payment_month),
            )
            .await
            .map_err(|e| {
                map_constraint_violation(
                    e,
                    &format!(
                        "Ya existe un pago registrado para el contrato {} en ese mes",
                        current.contract_id
                    ),
                )
            })?;

        Ok(payment)
    }
}
