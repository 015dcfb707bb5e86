//! Servicio de dashboard
//!
//! Agregados de solo lectura para la pantalla principal. El conteo de
//! ejemplares por cliente NO se recalcula aquí: vive en el contador derivado
//! `clients.specimen_count`.

use serde::Serialize;
use sqlx::PgPool;

use crate::utils::errors::AppResult;

/// Resumen general del negocio
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_clients: i64,
    pub active_clients: i64,
    pub total_specimens: i64,
    pub active_contracts: i64,
    pub total_sedes: i64,
    pub specimens_by_sede: Vec<SedeCount>,
}

#[derive(Debug, Serialize)]
pub struct SedeCount {
    pub sede: String,
    pub specimens: i64,
}

pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn summary(&self) -> AppResult<DashboardSummary> {
        let (total_clients,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await?;

        let (active_clients,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM clients WHERE status = 'active'")
                .fetch_one(&self.pool)
                .await?;

        let (total_specimens,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM specimens")
            .fetch_one(&self.pool)
            .await?;

        let (active_contracts,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM contracts WHERE status = 'active'")
                .fetch_one(&self.pool)
                .await?;

        let (total_sedes,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sedes")
            .fetch_one(&self.pool)
            .await?;

        let by_sede: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT s.name, COUNT(sp.id)
            FROM sedes s
            LEFT JOIN specimens sp ON sp.sede_id = s.id
            GROUP BY s.name
            ORDER BY s.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(DashboardSummary {
            total_clients,
            active_clients,
            total_specimens,
            active_contracts,
            total_sedes,
            specimens_by_sede: by_sede
                .into_iter()
                .map(|(sede, specimens)| SedeCount { sede, specimens })
                .collect(),
        })
    }
}
