//! Modelo de Contract
//!
//! Un contrato vincula un cliente con un conjunto de servicios facturables y,
//! opcionalmente, con un ejemplar. El `client_id` es inmutable después de la
//! creación. Las transiciones de estado válidas son `active → finished` y
//! `active → cancelled`; ambos destinos son terminales.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::client::ClientResponse;
use super::payment::PaymentResponse;
use super::service::ServiceResponse;
use super::specimen::SpecimenResponse;

/// Estado de un contrato. Mapea al tipo PostgreSQL `contract_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "contract_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Active,
    Finished,
    Cancelled,
}

impl ContractStatus {
    /// Indica si la transición de estado es legal.
    ///
    /// Escribir el mismo estado es un no-op permitido; `finished` y
    /// `cancelled` son terminales.
    pub fn can_transition_to(self, target: ContractStatus) -> bool {
        self == target || self == ContractStatus::Active
    }
}

/// Contrato - mapea exactamente a la tabla contracts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub id: Uuid,
    pub client_id: Uuid,
    pub start_date: NaiveDate,
    pub monthly_price: Decimal,
    pub status: ContractStatus,
    pub terms: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear un contrato junto con sus asociaciones
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContractRequest {
    pub client_id: Uuid,
    pub start_date: NaiveDate,
    pub monthly_price: Decimal,

    #[validate(length(max = 2000))]
    pub terms: Option<String>,

    /// Ejemplar a vincular; debe estar disponible (sin contrato).
    pub specimen_id: Option<Uuid>,

    /// Servicios a asociar. Ausente = sin servicios.
    #[serde(default)]
    pub service_ids: Vec<Uuid>,
}

/// Request para actualizar un contrato.
///
/// La presencia de `service_ids` (incluso como lista vacía) reemplaza el
/// conjunto completo de asociaciones; su ausencia lo deja intacto. El campo
/// `client_id` se acepta solo para poder rechazar explícitamente cualquier
/// intento de cambiarlo.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContractRequest {
    pub client_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub monthly_price: Option<Decimal>,
    pub status: Option<ContractStatus>,

    #[validate(length(max = 2000))]
    pub terms: Option<String>,

    pub service_ids: Option<Vec<Uuid>>,
}

/// Response de contrato plano (sin asociaciones)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub start_date: NaiveDate,
    pub monthly_price: Decimal,
    pub status: ContractStatus,
    pub terms: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Contract> for ContractResponse {
    fn from(contract: Contract) -> Self {
        Self {
            id: contract.id,
            client_id: contract.client_id,
            start_date: contract.start_date,
            monthly_price: contract.monthly_price,
            status: contract.status,
            terms: contract.terms,
            created_at: contract.created_at,
        }
    }
}

/// Grafo completo del contrato para la respuesta enriquecida:
/// cliente, ejemplares vinculados, servicios y pagos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractDetailResponse {
    #[serde(flatten)]
    pub contract: ContractResponse,
    pub client: ClientResponse,
    pub specimens: Vec<SpecimenResponse>,
    pub services: Vec<ServiceResponse>,
    pub payments: Vec<PaymentResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_can_finish_or_cancel() {
        assert!(ContractStatus::Active.can_transition_to(ContractStatus::Finished));
        assert!(ContractStatus::Active.can_transition_to(ContractStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_are_terminal() {
        assert!(!ContractStatus::Finished.can_transition_to(ContractStatus::Active));
        assert!(!ContractStatus::Finished.can_transition_to(ContractStatus::Cancelled));
        assert!(!ContractStatus::Cancelled.can_transition_to(ContractStatus::Active));
        assert!(!ContractStatus::Cancelled.can_transition_to(ContractStatus::Finished));
    }

    #[test]
    fn test_same_state_write_is_noop() {
        assert!(ContractStatus::Active.can_transition_to(ContractStatus::Active));
        assert!(ContractStatus::Finished.can_transition_to(ContractStatus::Finished));
        assert!(ContractStatus::Cancelled.can_transition_to(ContractStatus::Cancelled));
    }
}
