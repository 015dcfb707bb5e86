//! Repositorios de acceso a datos
//!
//! Cada repositorio encapsula las consultas SQL de una entidad. Los métodos
//! que deben componerse dentro de una transacción reciben un
//! `&mut PgConnection` del servicio que la posee; el resto opera sobre el
//! pool directamente.

pub mod care_repository;
pub mod client_repository;
pub mod contract_repository;
pub mod payment_repository;
pub mod role_repository;
pub mod sede_repository;
pub mod service_repository;
pub mod specimen_category_repository;
pub mod specimen_repository;
pub mod user_repository;
