//! Motor transaccional de contratos
//!
//! Crea, actualiza y elimina un contrato junto con sus asociaciones de
//! servicios y su vínculo opcional con un ejemplar, como una única unidad
//! atómica de trabajo. Ningún estado parcialmente asociado es observable:
//! todas las escrituras comparten la transacción y cualquier fallo previo al
//! commit revierte el conjunto completo.
//!
//! La lectura enriquecida para la respuesta ocurre DESPUÉS del commit: si esa
//! lectura falla, la escritura ya quedó firme y el error se reporta como
//! `Internal` con el ID creado, nunca como un fallo de la operación.

use std::collections::HashSet;

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::contract::{
    Contract, ContractDetailResponse, CreateContractRequest, UpdateContractRequest,
};
use crate::repositories::client_repository::ClientRepository;
use crate::repositories::contract_repository::ContractRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::service_repository::ServiceRepository;
use crate::repositories::specimen_repository::SpecimenRepository;
use crate::utils::errors::{map_constraint_violation, AppError, AppResult};

pub struct ContractService {
    pool: PgPool,
    contracts: ContractRepository,
    clients: ClientRepository,
    specimens: SpecimenRepository,
    payments: PaymentRepository,
}

impl ContractService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            contracts: ContractRepository::new(pool.clone()),
            clients: ClientRepository::new(pool.clone()),
            specimens: SpecimenRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Contract>> {
        self.contracts.list().await
    }

    /// Grafo completo del contrato: cliente, ejemplares, servicios y pagos.
    pub async fn get_detail(&self, id: Uuid) -> AppResult<ContractDetailResponse> {
        let contract = self
            .contracts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contrato con ID {} no encontrado", id)))?;

        let client = self
            .clients
            .find_by_id(contract.client_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "El contrato {} referencia un cliente inexistente",
                    id
                ))
            })?;

        let specimens = self.specimens.list_by_contract(id).await?;
        let services = self.contracts.services_of(id).await?;
        let payments = self.payments.list_by_contract(id).await?;

        Ok(ContractDetailResponse {
            contract: contract.into(),
            client: client.into(),
            specimens: specimens.into_iter().map(Into::into).collect(),
            services: services.into_iter().map(Into::into).collect(),
            payments: payments.into_iter().map(Into::into).collect(),
        })
    }

    /// Crea el contrato, asocia servicios y vincula el ejemplar en una sola
    /// transacción. Orden: validar → insertar → asociar → vincular → commit.
    pub async fn create(&self, request: CreateContractRequest) -> AppResult<ContractDetailResponse> {
        request.validate()?;

        if request.monthly_price <= Decimal::ZERO {
            return Err(AppError::BadRequest(
                "El precio mensual debe ser mayor que cero".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        ClientRepository::find_by_id_in(&mut *tx, request.client_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Cliente con ID {} no encontrado",
                    request.client_id
                ))
            })?;

        // Chequeo informativo de disponibilidad: produce un mensaje claro
        // antes de hacer trabajo; la garantía real de exclusividad es el
        // UPDATE condicional del paso de vínculo.
        if let Some(specimen_id) = request.specimen_id {
            let specimen = SpecimenRepository::find_by_id_in(&mut *tx, specimen_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "Ejemplar con ID {} no encontrado para asociar",
                        specimen_id
                    ))
                })?;

            if let Some(existing_contract) = specimen.contract_id {
                return Err(AppError::Conflict(format!(
                    "El ejemplar '{}' (ID: {}) ya tiene un contrato activo (Contrato ID: {})",
                    specimen.name, specimen_id, existing_contract
                )));
            }
        }

        let contract = ContractRepository::create_in(
            &mut *tx,
            request.client_id,
            request.start_date,
            request.monthly_price,
            request.terms,
        )
        .await?;

        if !request.service_ids.is_empty() {
            Self::replace_services(&mut *tx, contract.id, &request.service_ids).await?;
        }

        if let Some(specimen_id) = request.specimen_id {
            let bound =
                SpecimenRepository::bind_contract_in(&mut *tx, specimen_id, contract.id).await?;
            if bound == 0 {
                // Otro escritor ganó la carrera entre el chequeo y el UPDATE.
                return Err(AppError::Conflict(format!(
                    "El ejemplar {} ya fue vinculado a otro contrato",
                    specimen_id
                )));
            }
        }

        tx.commit().await?;
        info!("Contrato {} creado", contract.id);

        self.get_detail(contract.id).await.map_err(|e| {
            AppError::Internal(format!(
                "El contrato fue creado (ID: {}), pero hubo un error al cargar sus detalles completos: {}",
                contract.id, e
            ))
        })
    }

    /// Actualiza campos del contrato y, si `service_ids` está presente
    /// (incluso vacío), reemplaza el conjunto completo de servicios. El
    /// cliente es inmutable y las transiciones de estado se validan contra
    /// la máquina de estados.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateContractRequest,
    ) -> AppResult<ContractDetailResponse> {
        request.validate()?;

        let mut tx = self.pool.begin().await?;

        let contract = ContractRepository::find_by_id_in(&mut *tx, id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Contrato no encontrado para actualizar".to_string())
            })?;

        if let Some(client_id) = request.client_id {
            if client_id != contract.client_id {
                return Err(AppError::BadRequest(
                    "El cliente de un contrato es inmutable y no puede cambiarse".to_string(),
                ));
            }
        }

        if let Some(price) = request.monthly_price {
            if price <= Decimal::ZERO {
                return Err(AppError::BadRequest(
                    "El precio mensual debe ser mayor que cero".to_string(),
                ));
            }
        }

        let status = match request.status {
            Some(target) => {
                if !contract.status.can_transition_to(target) {
                    return Err(AppError::Conflict(format!(
                        "Transición de estado inválida: {:?} → {:?}",
                        contract.status, target
                    )));
                }
                target
            }
            None => contract.status,
        };

        let updated = ContractRepository::update_fields_in(
            &mut *tx,
            id,
            request.start_date.unwrap_or(contract.start_date),
            request.monthly_price.unwrap_or(contract.monthly_price),
            status,
            request.terms.or(contract.terms),
        )
        .await?;

        if let Some(service_ids) = &request.service_ids {
            Self::replace_services(&mut *tx, id, service_ids).await?;
        }

        tx.commit().await?;
        info!("Contrato {} actualizado", updated.id);

        self.get_detail(updated.id).await.map_err(|e| {
            AppError::Internal(format!(
                "El contrato fue actualizado (ID: {}), pero hubo un error al cargar sus detalles: {}",
                updated.id, e
            ))
        })
    }

    /// Elimina el contrato dentro de una transacción, en orden: asociaciones
    /// de servicios, liberación de ejemplares (contract_id → NULL) y la fila
    /// del contrato. Así ningún ejemplar queda apuntando a un contrato
    /// borrado.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        ContractRepository::find_by_id_in(&mut *tx, id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Contrato no encontrado para eliminar".to_string())
            })?;

        ContractRepository::clear_services_in(&mut *tx, id).await?;
        SpecimenRepository::release_by_contract_in(&mut *tx, id).await?;

        ContractRepository::delete_in(&mut *tx, id).await.map_err(|e| {
            map_constraint_violation(
                e,
                "No se puede eliminar el contrato: tiene registros asociados que lo impiden",
            )
        })?;

        tx.commit().await?;
        info!("Contrato {} eliminado", id);

        Ok(())
    }

    /// Valida que todos los ids de servicio existan y reemplaza el conjunto
    /// de asociaciones del contrato. Los ids faltantes se listan en el error.
    async fn replace_services(
        conn: &mut sqlx::PgConnection,
        contract_id: Uuid,
        service_ids: &[Uuid],
    ) -> AppResult<()> {
        let unique: Vec<Uuid> = {
            let mut seen = HashSet::new();
            service_ids
                .iter()
                .copied()
                .filter(|id| seen.insert(*id))
                .collect()
        };

        if !unique.is_empty() {
            let existing: HashSet<Uuid> =
                ServiceRepository::find_existing_ids_in(&mut *conn, &unique)
                    .await?
                    .into_iter()
                    .collect();

            let missing: Vec<String> = unique
                .iter()
                .filter(|id| !existing.contains(id))
                .map(|id| id.to_string())
                .collect();

            if !missing.is_empty() {
                return Err(AppError::NotFound(format!(
                    "Servicios no encontrados: {}",
                    missing.join(", ")
                )));
            }
        }

        ContractRepository::set_services_in(&mut *conn, contract_id, &unique).await
    }
}
