//! Servicio de clientes
//!
//! CRUD de clientes con chequeos de duplicado sobre documento y email. La
//! eliminación existe en dos estrategias explícitas y el caller elige:
//!
//! - `deactivate`: borrado lógico (status → inactive), reversible.
//! - `purge`: borrado físico, rechazado con Conflict mientras el cliente
//!   conserve ejemplares.
//!
//! El contador `specimen_count` nunca se escribe desde aquí: solo lo ajusta
//! el mantenedor de contadores del servicio de ejemplares.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::client::{Client, ClientFilters, CreateClientRequest, UpdateClientRequest};
use crate::models::EntityStatus;
use crate::repositories::client_repository::ClientRepository;
use crate::utils::errors::{conflict_error, map_constraint_violation, AppError, AppResult};

pub struct ClientService {
    clients: ClientRepository,
}

impl ClientService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            clients: ClientRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: &ClientFilters) -> AppResult<Vec<Client>> {
        self.clients.list(filters).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Client> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))
    }

    pub async fn create(&self, request: CreateClientRequest) -> AppResult<Client> {
        request.validate()?;

        // Chequeos amistosos; la restricción de unicidad del esquema es la
        // garantía final bajo escritores concurrentes.
        if self
            .clients
            .find_by_document(&request.document, None)
            .await?
            .is_some()
        {
            return Err(conflict_error("Cliente", "documento", &request.document));
        }

        if self
            .clients
            .find_by_email(&request.email, None)
            .await?
            .is_some()
        {
            return Err(conflict_error("Cliente", "email", &request.email));
        }

        let client = self
            .clients
            .create(request.name, request.document, request.email, request.phone)
            .await
            .map_err(|e| {
                map_constraint_violation(e, "Ya existe un cliente con ese documento o email")
            })?;

        info!("Cliente {} registrado", client.id);
        Ok(client)
    }

    pub async fn update(&self, id: Uuid, request: UpdateClientRequest) -> AppResult<Client> {
        request.validate()?;

        let current = self.get_by_id(id).await?;

        if let Some(document) = &request.document {
            if self
                .clients
                .find_by_document(document, Some(id))
                .await?
                .is_some()
            {
                return Err(conflict_error("Cliente", "documento", document));
            }
        }

        if let Some(email) = &request.email {
            if self.clients.find_by_email(email, Some(id)).await?.is_some() {
                return Err(conflict_error("Cliente", "email", email));
            }
        }

        let client = self
            .clients
            .update(
                id,
                request.name.unwrap_or(current.name),
                request.document.unwrap_or(current.document),
                request.email.unwrap_or(current.email),
                request.phone.unwrap_or(current.phone),
            )
            .await
            .map_err(|e| {
                map_constraint_violation(e, "Ya existe un cliente con ese documento o email")
            })?;

        Ok(client)
    }

    /// Borrado lógico: marca el cliente como inactivo.
    pub async fn deactivate(&self, id: Uuid) -> AppResult<Client> {
        let client = self.get_by_id(id).await?;

        if client.status == EntityStatus::Inactive {
            return Err(AppError::Conflict(
                "El cliente ya está inactivo".to_string(),
            ));
        }

        let client = self.clients.set_status(id, EntityStatus::Inactive).await?;
        info!("Cliente {} desactivado", id);
        Ok(client)
    }

    pub async fn reactivate(&self, id: Uuid) -> AppResult<Client> {
        let client = self.get_by_id(id).await?;

        if client.status == EntityStatus::Active {
            return Err(AppError::Conflict("El cliente ya está activo".to_string()));
        }

        let client = self.clients.set_status(id, EntityStatus::Active).await?;
        info!("Cliente {} reactivado", id);
        Ok(client)
    }

    /// Borrado físico y permanente. Se rechaza mientras el cliente conserve
    /// ejemplares registrados; los contratos remanentes disparan la clave
    /// foránea y se traducen a Conflict.
    pub async fn purge(&self, id: Uuid) -> AppResult<()> {
        let client = self.get_by_id(id).await?;

        if client.specimen_count > 0 {
            return Err(AppError::Conflict(format!(
                "No se puede eliminar el cliente: tiene {} ejemplar(es) registrados",
                client.specimen_count
            )));
        }

        self.clients.delete(id).await.map_err(|e| {
            map_constraint_violation(
                e,
                "No se puede eliminar el cliente: tiene contratos u otros registros asociados",
            )
        })?;

        info!("Cliente {} eliminado permanentemente", id);
        Ok(())
    }
}
