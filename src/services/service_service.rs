//! Servicio de servicios facturables

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::service::{CreateServiceRequest, Service, UpdateServiceRequest};
use crate::models::EntityStatus;
use crate::repositories::service_repository::ServiceRepository;
use crate::utils::errors::{map_constraint_violation, AppError, AppResult};

pub struct ServiceService {
    services: ServiceRepository,
}

impl ServiceService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            services: ServiceRepository::new(pool),
        }
    }

    pub async fn list(&self, status: Option<EntityStatus>) -> AppResult<Vec<Service>> {
        self.services.list(status).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Service> {
        self.services
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Servicio no encontrado".to_string()))
    }

    pub async fn create(&self, request: CreateServiceRequest) -> AppResult<Service> {
        request.validate()?;

        if request.price < Decimal::ZERO {
            return Err(AppError::BadRequest(
                "El precio del servicio no puede ser negativo".to_string(),
            ));
        }

        self.services
            .create(
                request.name.clone(),
                request.description,
                request.price,
                request.image_url,
            )
            .await
            .map_err(|e| {
                map_constraint_violation(
                    e,
                    &format!("Ya existe un servicio llamado '{}'", request.name),
                )
            })
    }

    pub async fn update(&self, id: Uuid, request: UpdateServiceRequest) -> AppResult<Service> {
        request.validate()?;

        if let Some(price) = request.price {
            if price < Decimal::ZERO {
                return Err(AppError::BadRequest(
                    "El precio del servicio no puede ser negativo".to_string(),
                ));
            }
        }

        let current = self.get_by_id(id).await?;
        let name = request.name.unwrap_or(current.name);

        self.services
            .update(
                id,
                name.clone(),
                request.description.or(current.description),
                request.price.unwrap_or(current.price),
                request.image_url.or(current.image_url),
            )
            .await
            .map_err(|e| {
                map_constraint_violation(e, &format!("Ya existe un servicio llamado '{}'", name))
            })
    }

    pub async fn set_status(&self, id: Uuid, status: EntityStatus) -> AppResult<Service> {
        self.get_by_id(id).await?;
        self.services.set_status(id, status).await
    }

    /// Elimina el servicio. Las asociaciones con contratos disparan la clave
    /// foránea y se reportan como Conflict.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.get_by_id(id).await?;

        self.services.delete(id).await.map_err(|e| {
            map_constraint_violation(
                e,
                "No se puede eliminar el servicio: está asociado a contratos",
            )
        })?;

        Ok(())
    }
}
